// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod ids;
pub mod model;
pub mod nav;
pub mod record;
pub mod state;
pub mod validation;
pub mod view;

pub use ids::*;
pub use model::*;
pub use nav::*;
pub use record::*;
pub use state::*;
pub use validation::{ValidationError, ValidationResult};
pub use view::*;
