//! Lowering: one postorder walk from the typed AST straight to backend IR,
//! applying the coercion algebra at every site two values meet. There is no
//! separate type-checking pass — a type error is detected and reported at
//! the point lowering would otherwise emit an incompatible instruction.

mod coerce;
mod lower;
mod scope;
mod types;

pub use coerce::{coerce_to_common, coerce_to_target};
pub use lower::{LoweringContext, ENTRY_FN_NAME};
pub use scope::{Binding, ScopeStack};
pub use types::{scalar_to_basic, surface_to_basic, ScalarType, SurfaceType};
