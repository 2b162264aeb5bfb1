// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod demo;
mod http;
mod memory;

pub use http::{HttpCollection, ShopApi, validate_base_url};
pub use memory::MemoryCollection;
