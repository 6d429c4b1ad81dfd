// 麻雀のデータモデル
mod counts;
mod define;
mod error;
mod meld;
mod player;
mod tile;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use counts::*;
pub use define::*;
pub use error::*;
pub use meld::*;
pub use player::*;
pub use tile::*;
