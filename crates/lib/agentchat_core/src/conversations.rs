//! Conversation starters offered next to the transcript.

/// A canned topic a user can pick to start a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationStarter {
    pub id: &'static str,
    pub title: &'static str,
}

pub const STARTERS: &[ConversationStarter] = &[
    ConversationStarter {
        id: "getting-started",
        title: "Getting Started",
    },
    ConversationStarter {
        id: "task-planning",
        title: "Task Planning",
    },
    ConversationStarter {
        id: "problem-solving",
        title: "Problem Solving",
    },
    ConversationStarter {
        id: "creative-writing",
        title: "Creative Writing",
    },
];
