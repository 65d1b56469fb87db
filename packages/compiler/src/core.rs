//! Core Types
//!
//! Duplicates the runtime enums a component declaration may reference, so that symbol names
//! read out of partial declarations can be mapped back onto them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum ViewEncapsulation {
    #[default]
    Emulated = 0,
    Native = 1,
    None = 2,
    ShadowDom = 3,
}

impl ViewEncapsulation {
    /// Resolve the member named by a `ViewEncapsulation.<Name>` reference.
    pub fn from_symbol_name(name: &str) -> Option<Self> {
        match name {
            "Emulated" => Some(ViewEncapsulation::Emulated),
            "Native" => Some(ViewEncapsulation::Native),
            "None" => Some(ViewEncapsulation::None),
            "ShadowDom" => Some(ViewEncapsulation::ShadowDom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum ChangeDetectionStrategy {
    OnPush = 0,
    #[default]
    Default = 1,
}

impl ChangeDetectionStrategy {
    pub fn from_symbol_name(name: &str) -> Option<Self> {
        match name {
            "OnPush" => Some(ChangeDetectionStrategy::OnPush),
            "Default" => Some(ChangeDetectionStrategy::Default),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_resolve_every_encapsulation_member() {
        for (name, expected) in [
            ("Emulated", ViewEncapsulation::Emulated),
            ("Native", ViewEncapsulation::Native),
            ("None", ViewEncapsulation::None),
            ("ShadowDom", ViewEncapsulation::ShadowDom),
        ] {
            assert_eq!(ViewEncapsulation::from_symbol_name(name), Some(expected));
        }
        assert_eq!(ViewEncapsulation::from_symbol_name("IsolatedShadowDom"), None);
    }

    #[test]
    fn should_keep_runtime_values() {
        assert_eq!(ViewEncapsulation::Native as u8, 1);
        assert_eq!(ChangeDetectionStrategy::Default as u8, 1);
        assert_eq!(ChangeDetectionStrategy::default(), ChangeDetectionStrategy::Default);
        assert_eq!(ViewEncapsulation::default(), ViewEncapsulation::Emulated);
    }

    #[test]
    fn should_reject_unknown_change_detection_names() {
        assert_eq!(
            ChangeDetectionStrategy::from_symbol_name("OnPush"),
            Some(ChangeDetectionStrategy::OnPush)
        );
        assert_eq!(ChangeDetectionStrategy::from_symbol_name("Eager"), None);
    }
}
