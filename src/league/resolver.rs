/// Who took the match point in one head-to-head fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    LeftWin,
    RightWin,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub left_match_point: u32,
    pub right_match_point: u32,
    pub outcome: Outcome,
}

/// Score one fixture. Higher gameweek points takes the single match point;
/// a tie at any score, 0-0 included, awards nothing to either side.
pub fn resolve(left_points: i32, right_points: i32) -> Resolution {
    let outcome = match left_points.cmp(&right_points) {
        std::cmp::Ordering::Greater => Outcome::LeftWin,
        std::cmp::Ordering::Less => Outcome::RightWin,
        std::cmp::Ordering::Equal => Outcome::Draw,
    };
    let (left_match_point, right_match_point) = match outcome {
        Outcome::LeftWin => (1, 0),
        Outcome::RightWin => (0, 1),
        Outcome::Draw => (0, 0),
    };
    Resolution { left_match_point, right_match_point, outcome }
}
