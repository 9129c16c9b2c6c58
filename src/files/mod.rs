//! File operations module for Livemark
//!
//! This module provides the native save dialog used when downloading
//! documents.

pub mod dialogs;
