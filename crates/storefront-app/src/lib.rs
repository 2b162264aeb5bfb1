// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dashboard;
pub mod error;
pub mod forms;
pub mod graphs;
pub mod ids;
pub mod model;
pub mod resource;
pub mod screen;
pub mod state;
pub mod values;

pub use dashboard::*;
pub use error::*;
pub use forms::*;
pub use graphs::*;
pub use ids::*;
pub use model::*;
pub use resource::*;
pub use screen::*;
pub use state::*;
