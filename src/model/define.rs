// 型エイリアス
pub type Seat = usize; // 座席
pub type Kind = usize; // 牌の種類 (0~33)
pub type Score = i32; // 点数

// Number
pub const SEAT: usize = 4; // 座席の数
pub const KIND: usize = 34; // 牌の種類の数
pub const TILE: usize = 4; // 同種の牌の数
pub const TILE_TOTAL: usize = KIND * TILE; // 牌の総数 (136)
pub const NO_SEAT: Seat = SEAT; // 座席なし
pub const NO_KIND: Kind = KIND; // 牌なし

// 牌種の先頭Kind
pub const TM: Kind = 0; // Manzu (萬子) 0~8
pub const TP: Kind = 9; // Pinzu (筒子) 9~17
pub const TS: Kind = 18; // Souzu (索子) 18~26
pub const TZ: Kind = 27; // Zihai (字牌) 27~33

// 字牌
pub const WE: Kind = 27; // Wind:    East  (東)
pub const WS: Kind = 28; // Wind:    South (南)
pub const WW: Kind = 29; // Wind:    West  (西)
pub const WN: Kind = 30; // Wind:    North (北)
pub const DW: Kind = 31; // Doragon: White (白)
pub const DG: Kind = 32; // Doragon: Green (發)
pub const DR: Kind = 33; // Doragon: Red   (中)
