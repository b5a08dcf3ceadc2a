// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A retained 2D item store for GobCharts.
//!
//! This crate plays the "drawing surface" role for the chart engine: it holds
//! positioned shape primitives (rectangles, ellipse segments, lines, text)
//! with fill/stroke paint, opacity and z-order, answers point containment
//! queries, and tracks keyboard focus for text items.
//!
//! Rendering is out of scope: a renderer walks [`Scene::items`] sorted by
//! `(z_index, id)` and draws with whatever backend it likes.

mod item;
mod scene;
pub mod z_order;

pub use item::{Item, ItemId, LineStyle, ShapeKind, Stroke, TextShape};
pub use scene::Scene;
