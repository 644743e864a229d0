//! # Reinhardt Staff Toolbar
//!
//! A toolbar of admin shortcuts, shown on the public pages of a site to staff
//! users, inspired by django-staff-toolbar.
//!
//! This crate provides:
//! - Configurable items, referenced by dotted path from settings
//! - Links to the admin dashboard, the logout view and the admin page of the
//!   object shown on the current page
//! - Nested groups with titles
//! - Per-request object and URL overrides, set from page templates
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reinhardt_staff_toolbar::{StaffToolbarSettings, configure, render_staff_toolbar, set_staff_object};
//! use reinhardt_staff_toolbar::context::{RenderContext, StaffRequest, StaffUser};
//!
//! configure(StaffToolbarSettings::from_file("settings/staff_toolbar.toml")?);
//!
//! let mut request = StaffRequest::new(StaffUser::staff("editor"));
//! set_staff_object(&mut request, page.clone());
//! let html = render_staff_toolbar(&request, &RenderContext::default())?;
//! ```
//!
//! ## Configuration
//!
//! ```toml
//! STAFF_TOOLBAR_ITEMS = [
//!     "staff_toolbar.items.AdminIndexLink",
//!     "staff_toolbar.items.ChangeObjectLink",
//!     [
//!         { title = "User" },
//!         { path = "staff_toolbar.items.Link", kwargs = { url = { route = "admin:password_change" }, title = "Change password" } },
//!         "staff_toolbar.items.LogoutLink",
//!     ],
//! ]
//! ```
//!
//! Application items are registered with
//! [`register_toolbar_item!`] and [`register_toolbar_module!`].
//!
//! ## Architecture
//!
//! 1. **Registry**: dotted paths to item types and render functions
//! 2. **Root**: the configured tree, built once per process on first render
//! 3. **Items**: stateless renderers, shared by all requests
//! 4. **Request state**: overrides live on [`StaffRequest`](context::StaffRequest)

#![warn(missing_docs)]

// Module declarations following Rust 2024 module system (no mod.rs)
pub mod context;
pub mod error;
pub mod html;
pub mod i18n;
pub mod items;
pub mod loading;
pub mod object;
pub mod reference;
pub mod registry;
pub mod settings;
pub mod tags;
pub mod urls;
pub mod views;

// Re-export main types
pub use error::{ConfigIssue, ToolbarError, ToolbarResult};
pub use items::{Group, Link, Literal, RenderItem, RootNode, Title};
pub use loading::{Toolbar, get_toolbar_root, load_toolbar_item, render_root};
pub use reference::{ItemArgs, ItemRef, toolbar_item, toolbar_literal, toolbar_title};
pub use registry::{ItemFactory, ItemRegistry, Symbol};
pub use settings::{StaffToolbarSettings, configure};
pub use tags::{render_staff_toolbar, set_staff_object, set_staff_url, staff_toolbar_tree};

// Used by the registration macros.
#[doc(hidden)]
pub use inventory;
