//! Terminal workbench for astview
pub mod app;
pub mod model;
pub mod ruleviewer;
pub mod treeviewer;
pub mod ui;
#[allow(clippy::module_inception)]
pub mod viewer;
pub mod watch;
