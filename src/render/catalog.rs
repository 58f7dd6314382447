//! Markdown blocks for catalog items.

use serde_json::Value;

use crate::record::{display, Preview, Record};
use crate::render::markdown::Block;

/// Format a single catalog item.
pub fn item_block(value: &Value) -> String {
    let item = Record::new(value);
    let mut block = Block::for_record(2, &item, &["name"]);

    block
        .field("Type", item.text("type"))
        .field("Description", item.text("description"))
        .field("Created", item.text("created_at"))
        .preview("Tags", item.list("tags").map(|tags| Preview::new(tags.iter().map(display))));

    block.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_item() {
        let value = json!({
            "id": "item-001",
            "name": "Project Proposal",
            "type": "document",
            "description": "Q1 project proposal document",
            "created_at": "2024-01-15",
            "tags": ["important", "q1"],
        });

        assert_eq!(
            item_block(&value),
            "## Project Proposal (ID: item-001)\n\
             **Type**: document\n\
             **Description**: Q1 project proposal document\n\
             **Created**: 2024-01-15\n\
             **Tags**: important, q1"
        );
    }

    #[test]
    fn test_missing_description_has_no_line() {
        let value = json!({"id": "item-009", "name": "Bare", "type": "other", "tags": []});
        let text = item_block(&value);
        assert!(!text.contains("Description"));
        assert!(!text.contains("Tags"));
        assert!(text.contains("**Type**: other"));
    }

    #[test]
    fn test_unnamed_item() {
        assert_eq!(item_block(&json!({})), "## Unnamed (ID: N/A)");
    }
}
