pub mod match_card;
pub mod score_card;
