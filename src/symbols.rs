//! Symbols for plot titles. Allow for use of Unicode when desired with ASCII fallback.

use crate::markup::Block;

macro_rules! sym {
    ($i:ident, $asc:literal, $uni:literal) => {
        pub const $i: Block = Block::symbol($asc, $uni);
    };
}

sym!(THETA, "theta", "\u{03B8}");
sym!(DEGREE, " deg", "\u{00B0}");
