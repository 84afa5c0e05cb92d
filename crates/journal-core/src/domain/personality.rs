//! 투자 성향.
//!
//! 성향별로 달라지는 값(체크리스트 통과 기준, 선호 지표 기준값, 표시 문구)은
//! 모두 이 모듈의 `match` 테이블 한 곳에서 정의합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::JournalError;
use crate::types::Percentage;

/// 투자 성향 설문 문항 수.
pub const QUIZ_QUESTION_COUNT: usize = 7;

/// 문항별 최대 점수.
pub const QUIZ_MAX_SCORE: u8 = 5;

/// 안정형 판정 상한 점수 (이하).
const CONSERVATIVE_MAX_SCORE: u32 = 10;

/// 중립형 판정 상한 점수 (이하).
const MODERATE_MAX_SCORE: u32 = 24;

/// 사용자가 선택한 투자 성향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    /// 안정형
    Conservative,
    /// 중립형
    Moderate,
    /// 공격형
    Aggressive,
}

/// 성향별 선호 지표 기준값.
///
/// PER/PBR은 기준값 미만, EPS는 기준값 초과일 때 충족으로 봅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceValues {
    pub per: Decimal,
    pub pbr: Decimal,
    pub eps: Decimal,
}

impl Personality {
    /// 모든 성향 (보수적 → 공격적 순).
    pub const ALL: [Personality; 3] = [
        Personality::Conservative,
        Personality::Moderate,
        Personality::Aggressive,
    ];

    /// 성향이 설정되지 않았을 때 사용하는 기본 성향.
    pub const DEFAULT: Personality = Personality::Moderate;

    /// 설정되지 않은 성향을 기본값으로 해석합니다.
    pub fn resolve(personality: Option<Personality>) -> Personality {
        personality.unwrap_or(Self::DEFAULT)
    }

    /// 체크리스트 통과에 필요한 지표 충족률 (%).
    pub fn required_pass_rate(&self) -> Percentage {
        match self {
            Personality::Aggressive => dec!(50),
            Personality::Moderate => dec!(70),
            Personality::Conservative => dec!(90),
        }
    }

    /// 매매 복기에 사용하는 선호 지표 기준값.
    pub fn preference_values(&self) -> PreferenceValues {
        match self {
            Personality::Conservative => PreferenceValues {
                per: dec!(10),
                pbr: dec!(0.8),
                eps: dec!(2000),
            },
            Personality::Moderate => PreferenceValues {
                per: dec!(15),
                pbr: dec!(1.2),
                eps: dec!(1500),
            },
            Personality::Aggressive => PreferenceValues {
                per: dec!(25),
                pbr: dec!(2.0),
                eps: dec!(1000),
            },
        }
    }

    /// 화면 표시용 제목.
    pub fn title(&self) -> &'static str {
        match self {
            Personality::Conservative => "안정형 (보수적 투자자)",
            Personality::Moderate => "중립형 (균형 투자자)",
            Personality::Aggressive => "공격형 (적극적 투자자)",
        }
    }

    /// 설문 총점으로 성향을 판정합니다.
    pub fn from_quiz_score(total: u32) -> Self {
        if total <= CONSERVATIVE_MAX_SCORE {
            Personality::Conservative
        } else if total <= MODERATE_MAX_SCORE {
            Personality::Moderate
        } else {
            Personality::Aggressive
        }
    }

    /// 설문 응답으로 성향을 판정합니다.
    ///
    /// 응답하지 않은 문항(`None`)은 0점으로 계산합니다.
    pub fn from_quiz_answers(answers: &[Option<u8>]) -> Self {
        let total: u32 = answers.iter().flatten().map(|&score| u32::from(score)).sum();
        Self::from_quiz_score(total)
    }
}

impl std::str::FromStr for Personality {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(JournalError::InvalidInput(format!(
                "알 수 없는 투자 성향: {} (conservative, moderate, aggressive)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Personality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Personality::Conservative => write!(f, "conservative"),
            Personality::Moderate => write!(f, "moderate"),
            Personality::Aggressive => write!(f, "aggressive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_pass_rate() {
        assert_eq!(Personality::Aggressive.required_pass_rate(), dec!(50));
        assert_eq!(Personality::Moderate.required_pass_rate(), dec!(70));
        assert_eq!(Personality::Conservative.required_pass_rate(), dec!(90));
        assert_eq!(Personality::resolve(None).required_pass_rate(), dec!(70));
    }

    #[test]
    fn test_quiz_boundaries() {
        assert_eq!(Personality::from_quiz_score(7), Personality::Conservative);
        assert_eq!(Personality::from_quiz_score(10), Personality::Conservative);
        assert_eq!(Personality::from_quiz_score(11), Personality::Moderate);
        assert_eq!(Personality::from_quiz_score(24), Personality::Moderate);
        assert_eq!(Personality::from_quiz_score(25), Personality::Aggressive);
    }

    #[test]
    fn test_quiz_answers_missing_count_as_zero() {
        let answers = [Some(5), Some(5), None, None, None, None, None];
        assert_eq!(Personality::from_quiz_answers(&answers), Personality::Conservative);

        let answers = [Some(5); QUIZ_QUESTION_COUNT];
        assert_eq!(Personality::from_quiz_answers(&answers), Personality::Aggressive);
    }

    #[test]
    fn test_preference_values_are_stricter_for_conservative() {
        let conservative = Personality::Conservative.preference_values();
        let aggressive = Personality::Aggressive.preference_values();
        assert!(conservative.per < aggressive.per);
        assert!(conservative.pbr < aggressive.pbr);
        assert!(conservative.eps > aggressive.eps);
    }

    #[test]
    fn test_from_str_round_trip() {
        for p in Personality::ALL {
            assert_eq!(p.to_string().parse::<Personality>().unwrap(), p);
        }
        assert!("yolo".parse::<Personality>().is_err());
    }
}
