pub mod entity_kind;
pub mod role;

pub use entity_kind::EntityKind;
pub use role::Role;
