use crate::model::*;

// (ロン和了, ツモ和了の子の支払い or 親の和了の各支払い, ツモ和了の親の支払い)
pub type Points = (Score, Score, Score);

// 100点単位に切り上げ
fn ceil100(n: Score) -> Score {
    (n + 99) / 100 * 100
}

// 基本点
pub fn calc_base_point(fu: usize, han: usize, yakuman: usize) -> Score {
    if yakuman > 0 {
        return 8000 * yakuman as Score;
    }

    match han {
        0..=4 => (fu << (han + 2)).min(2000) as Score,
        5 => 2000,       // 満貫
        6..=7 => 3000,   // 跳満
        8..=10 => 4000,  // 倍満
        11..=12 => 6000, // 三倍満
        _ => 8000,       // 数え役満
    }
}

pub fn get_score_title(base_point: Score, yakuman: usize) -> &'static str {
    match yakuman {
        0 => match base_point {
            2000 => "満貫",
            3000 => "跳満",
            4000 => "倍満",
            6000 => "三倍満",
            8000 => "数え役満",
            _ => "",
        },
        1 => "役満",
        2 => "二倍役満",
        _ => "多倍役満",
    }
}

pub fn calc_points(is_dealer: bool, fu: usize, han: usize, yakuman: usize) -> Points {
    let base = calc_base_point(fu, han, yakuman);
    if is_dealer {
        (ceil100(base * 6), ceil100(base * 2), 0)
    } else {
        (ceil100(base * 4), ceil100(base), ceil100(base * 2))
    }
}

// 和了者の収入 (ツモ和了の場合は3人分の支払いの合計)
pub fn calc_score(points: Points, is_dealer: bool, is_drawn: bool) -> Score {
    if !is_drawn {
        points.0
    } else if is_dealer {
        points.1 * 3
    } else {
        points.1 * 2 + points.2
    }
}

#[test]
fn test_points_table() {
    // 子 30符
    assert_eq!(calc_points(false, 30, 1, 0), (1000, 300, 500));
    assert_eq!(calc_points(false, 30, 3, 0), (3900, 1000, 2000));
    assert_eq!(calc_points(false, 30, 4, 0), (7700, 2000, 3900));
    // 親 30符
    assert_eq!(calc_points(true, 30, 1, 0), (1500, 500, 0));
    assert_eq!(calc_points(true, 30, 4, 0), (11600, 3900, 0));
    // 七対子 25符
    assert_eq!(calc_points(false, 25, 2, 0), (1600, 400, 800));

    assert_eq!(calc_base_point(30, 5, 0), 2000);
    assert_eq!(calc_base_point(30, 6, 0), 3000);
    assert_eq!(calc_base_point(30, 13, 0), 8000);
    assert_eq!(calc_base_point(30, 80, 0), 8000);
    assert_eq!(calc_base_point(110, 4, 0), 2000);
    assert_eq!(calc_points(false, 30, 0, 1), (32000, 8000, 16000));
    assert_eq!(get_score_title(calc_base_point(30, 8, 0), 0), "倍満");
    assert_eq!(get_score_title(calc_base_point(30, 1, 0), 0), "");
}

#[test]
fn test_score() {
    let p = calc_points(false, 30, 2, 0);
    assert_eq!(calc_score(p, false, false), 2000);
    assert_eq!(calc_score(p, false, true), 500 * 2 + 1000);
    let p = calc_points(true, 30, 2, 0);
    assert_eq!(calc_score(p, true, true), 1000 * 3);
}
