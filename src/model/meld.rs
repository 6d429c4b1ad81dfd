use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeldType {
    Chi,
    Pon,
    #[serde(alias = "kan")]
    Minkan,
    Ankan,
}

impl MeldType {
    // 鳴きにより手牌から消失する牌の数 (捨て牌から拾う1枚は含まない)
    #[inline]
    pub fn consumed(self) -> usize {
        match self {
            MeldType::Chi | MeldType::Pon => 2,
            MeldType::Minkan => 3,
            MeldType::Ankan => 4,
        }
    }
}

impl fmt::Display for MeldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MeldType::Chi => "chi",
            MeldType::Pon => "pon",
            MeldType::Minkan => "minkan",
            MeldType::Ankan => "ankan",
        };
        write!(f, "{}", s)
    }
}

// kindはチーの場合は順子の先頭(最も小さい数字)の牌
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    #[serde(rename = "type")]
    pub meld_type: MeldType,
    pub kind: Kind,
    #[serde(default)]
    pub from: Seat,
}

impl Meld {
    pub fn new(meld_type: MeldType, kind: Kind, from: Seat) -> Self {
        Self {
            meld_type,
            kind,
            from,
        }
    }

    // 副露を構成する牌の種類の一覧
    pub fn kinds(&self) -> Vec<Kind> {
        let k = self.kind;
        match self.meld_type {
            MeldType::Chi => vec![k, k + 1, k + 2],
            MeldType::Pon => vec![k; 3],
            MeldType::Minkan | MeldType::Ankan => vec![k; 4],
        }
    }

    // 境界での入力チェック
    pub fn check(&self) -> Result<(), Error> {
        check_kind(self.kind)?;
        if self.meld_type == MeldType::Chi && (!is_suit(self.kind) || rank(self.kind) > 7) {
            return Err(Error::InvalidKind(self.kind));
        }
        if self.from >= SEAT {
            return Err(Error::InvalidSeat(self.from));
        }
        Ok(())
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self.kinds().into_iter().map(kind_symbol).collect();
        write!(f, "{}({})", s.join(""), self.from)
    }
}

// 門前 (暗槓のみは門前扱い)
pub fn is_menzen(melds: &[Meld]) -> bool {
    melds.iter().all(|m| m.meld_type == MeldType::Ankan)
}

#[test]
fn test_meld_kinds() {
    let chi = Meld::new(MeldType::Chi, TS + 2, 3);
    assert_eq!(chi.kinds(), vec![TS + 2, TS + 3, TS + 4]);
    assert!(chi.check().is_ok());
    assert!(Meld::new(MeldType::Chi, TS + 7, 3).check().is_err());
    assert!(Meld::new(MeldType::Chi, WE, 3).check().is_err());
    assert_eq!(Meld::new(MeldType::Minkan, DR, 1).kinds().len(), 4);
    assert_eq!(chi.to_string(), "s3s4s5(3)");

    assert!(is_menzen(&[]));
    assert!(is_menzen(&[Meld::new(MeldType::Ankan, DR, 0)]));
    assert!(!is_menzen(&[Meld::new(MeldType::Ankan, DR, 0), chi]));
}

#[test]
fn test_meld_json() {
    let m: Meld = serde_json::from_str(r#"{"type":"kan","kind":31}"#).unwrap();
    assert_eq!(m, Meld::new(MeldType::Minkan, DW, 0));
    let s = serde_json::to_string(&Meld::new(MeldType::Pon, 4, 2)).unwrap();
    assert_eq!(s, r#"{"type":"pon","kind":4,"from":2}"#);
}
