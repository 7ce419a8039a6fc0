//! State that lives for the whole chat session.
//!
//! A [`Conversation`] owns the character's [`EntityState`] and the two
//! message histories: the tool-detection history and the chat history.
//! It is created once by the conversation loop and passed by `&mut` into
//! every turn.

use crate::constants::{CHARACTER_CONTEXT_PREFIX, TOOLS_SYSTEM_PROMPT};
use crate::entity::EntityState;
use crate::message::{History, Message};
use crate::persona::Persona;

pub struct Conversation {
    pub entity: EntityState,
    detection: History,
    chat: History,
}

impl Conversation {
    /// Seeds both histories with their system entries.
    ///
    /// Detection starts from the tool-selection prompt; chat starts from
    /// the character sheet followed by the system instructions.
    pub fn new(entity: EntityState, persona: &Persona) -> Self {
        Self {
            entity,
            detection: History::with_system([TOOLS_SYSTEM_PROMPT.to_string()]),
            chat: History::with_system([
                format!("{CHARACTER_CONTEXT_PREFIX}{}", persona.character_sheet),
                persona.instructions.clone(),
            ]),
        }
    }

    pub fn detection(&self) -> &History {
        &self.detection
    }

    pub fn chat(&self) -> &History {
        &self.chat
    }

    pub(crate) fn push_detection(&mut self, message: Message) {
        self.detection.push(message);
    }

    pub(crate) fn push_chat(&mut self, message: Message) {
        self.chat.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn test_new_seeds_system_entries() {
        let persona = Persona {
            instructions: "Be a werewolf.".into(),
            character_sheet: "Name: Remus".into(),
        };
        let conversation = Conversation::new(EntityState::new(1.0, 2.0, 3.0, 4.0), &persona);

        let detection = conversation.detection().messages();
        assert_eq!(detection.len(), 1);
        assert_eq!(detection[0].role, Role::System);
        assert!(detection[0].content.starts_with("Your job is to understand"));

        assert_eq!(
            conversation.chat().messages(),
            &[
                Message::system("CONTEXT:\nName: Remus"),
                Message::system("Be a werewolf."),
            ]
        );
    }
}
