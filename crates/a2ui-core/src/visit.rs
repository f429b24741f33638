//! Single traversal of the component tree.
//!
//! Seeding, required-field collection and typed value decoding all walk the
//! tree through [`Leaves`], so they can never disagree on order.
use crate::schema::UIComponent;
use std::slice;

/// Pre-order, depth-first iterator over leaf components in document order.
/// Sections are expanded in place and are not yielded themselves.
pub struct Leaves<'a> {
    stack: Vec<slice::Iter<'a, UIComponent>>,
}

impl<'a> Leaves<'a> {
    pub fn new(components: &'a [UIComponent]) -> Self {
        Self {
            stack: vec![components.iter()],
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a UIComponent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(UIComponent::Section(section)) => {
                    self.stack.push(section.components.iter());
                }
                Some(leaf) => return Some(leaf),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Ids of every required value-bearing leaf, in traversal order.
pub fn required_ids(components: &[UIComponent]) -> Vec<&str> {
    Leaves::new(components)
        .filter(|c| c.is_required())
        .filter_map(UIComponent::id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Button, ImageField, Section, TextField, ToggleField, UIAction};

    fn tree() -> Vec<UIComponent> {
        vec![
            TextField::new("a", "A").required().into(),
            Section::new(
                "Outer",
                vec![
                    ToggleField::new("b", "B", false).into(),
                    Section::new("Empty", vec![]).into(),
                    Section::new("Inner", vec![ImageField::new("c", "C").required().into()]).into(),
                    TextField::new("d", "D").required().into(),
                ],
            )
            .into(),
            Button::new("go", "Go", UIAction::Submit).into(),
        ]
    }

    #[test]
    fn test_preorder_document_order() {
        let tree = tree();
        let ids: Vec<_> = Leaves::new(&tree).filter_map(UIComponent::id).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "go"]);
    }

    #[test]
    fn test_required_ids_skip_optional_and_buttons() {
        let tree = tree();
        assert_eq!(required_ids(&tree), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(Leaves::new(&[]).count(), 0);
    }
}
