//! vitric - a terminal code workbench
//!
//! A file-tree browser, a tabbed plain-text editor with a rule-table
//! C/C++ syntax highlighter, an embedded shell-command panel, and a
//! placeholder assistant bar.

pub mod app;
pub mod buffer;
pub mod config;
pub mod display;
pub mod error;
pub mod highlight;
pub mod input;
pub mod line;
pub mod shell;
pub mod tabs;
pub mod terminal;
pub mod theme;
pub mod tree;
