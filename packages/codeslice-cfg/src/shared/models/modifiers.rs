//! Declaration modifier bits
//!
//! The front end reports modifiers as a bit set per declaration; references
//! carry a copy so def/use consumers can tell fields, statics and finals
//! apart without going back to the program model.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Source-level modifiers of a class, method, field or variable
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICTFP = 0x0800;
        const DEFAULT = 0x1000;
    }
}

impl Modifiers {
    pub fn is_static(&self) -> bool {
        self.contains(Modifiers::STATIC)
    }

    pub fn is_final(&self) -> bool {
        self.contains(Modifiers::FINAL)
    }

    /// No access modifier present
    pub fn is_package_private(&self) -> bool {
        !self.intersects(Modifiers::PUBLIC | Modifiers::PRIVATE | Modifiers::PROTECTED)
    }
}
