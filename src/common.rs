mod node;

pub use kurbo::{Affine, Point};
pub use node::{Node, NodeType};
pub use openstep_plist::Dictionary;

/// Used by serde to skip default booleans.
pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}

pub(crate) fn is_true(b: &bool) -> bool {
    *b
}
