//! 지표 분류, 체크리스트, 투자 성향 설문.

use anyhow::{Context, Result};
use journal_analytics::{
    classify_indicators, evaluate_checklist, ChecklistOutcome, IndicatorReadings, IndicatorStatus,
};
use journal_core::{
    Fundamentals, IndicatorKey, IndicatorPreferences, Personality, QUIZ_MAX_SCORE,
    QUIZ_QUESTION_COUNT,
};
use serde::Serialize;

use crate::output::{pct, to_json, OutputFormat};

/// PER/PBR/EPS 가치주/성장주 분류.
pub fn classify(fundamentals: &Fundamentals, format: OutputFormat) -> Result<String> {
    let result = classify_indicators(fundamentals);

    match format {
        OutputFormat::Json => to_json(&result),
        OutputFormat::Table => {
            let mut output = format!(
                "{:<8} {:<6} {:>12} {:<12} {:<6}\n",
                "CATEGORY", "NAME", "VALUE", "CRITERION", "RESULT"
            );
            output.push_str(&"-".repeat(48));
            output.push('\n');
            for c in &result {
                output.push_str(&format!(
                    "{:<8} {:<6} {:>12} {:<12} {:<6}\n",
                    c.category.label(),
                    c.indicator,
                    c.value.normalize(),
                    c.criterion,
                    if c.verdict.is_pass() { "PASS" } else { "FAIL" }
                ));
            }
            Ok(output)
        }
    }
}

/// 체크리스트 설정.
#[derive(Debug)]
pub struct ChecklistConfig {
    pub personality: Option<Personality>,
    /// 사용자가 켠 지표 (필수 지표는 자동 포함)
    pub preferences: IndicatorPreferences,
    /// `KEY=VALUE` 형식 지표 값
    pub entries: Vec<String>,
}

/// 성향별 체크리스트 평가.
pub fn checklist(config: ChecklistConfig, format: OutputFormat) -> Result<String> {
    let readings = config
        .entries
        .iter()
        .map(|entry| IndicatorReadings::parse_entry(entry))
        .collect::<Result<IndicatorReadings, _>>()
        .context("Invalid indicator value")?;

    let outcome = evaluate_checklist(config.personality, config.preferences.keys(), &readings);

    match format {
        OutputFormat::Json => to_json(&outcome),
        OutputFormat::Table => Ok(format_checklist(&outcome)),
    }
}

fn format_checklist(outcome: &ChecklistOutcome) -> String {
    let mut output = format!("투자 성향: {}\n\n", outcome.personality.title());

    for check in &outcome.checks {
        let (mark, value) = match (check.status, check.value) {
            (IndicatorStatus::Pass, Some(v)) => ("✓", v.normalize().to_string()),
            (IndicatorStatus::Fail, Some(v)) => ("✗", v.normalize().to_string()),
            _ => ("-", "데이터 없음".to_string()),
        };
        output.push_str(&format!(
            "  {} {:<28} {:>12}  ({}){}\n",
            mark,
            check.key.display_name(),
            value,
            check.criterion,
            if check.key.is_mandatory() { " [필수]" } else { "" }
        ));
    }

    output.push_str(&format!(
        "\n충족: {}/{} ({}), 필요: {} 이상\n",
        outcome.passed,
        outcome.evaluated,
        pct(outcome.pass_rate),
        pct(outcome.required_rate)
    ));
    output.push_str(if outcome.passed_overall {
        "결과: 통과"
    } else {
        "결과: 미통과"
    });
    output
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuizResult {
    total_score: u32,
    personality: Personality,
    title: &'static str,
}

/// 쉼표로 구분된 설문 점수를 파싱합니다. 빈 항목은 미응답입니다.
pub fn parse_answers(raw: &str) -> Result<Vec<Option<u8>>> {
    let answers = raw
        .split(',')
        .map(str::trim)
        .map(|s| -> Result<Option<u8>> {
            if s.is_empty() {
                return Ok(None);
            }
            let score: u8 = s
                .parse()
                .with_context(|| format!("Invalid score: {}", s))?;
            if !(1..=QUIZ_MAX_SCORE).contains(&score) {
                anyhow::bail!("Score must be 1-{}: {}", QUIZ_MAX_SCORE, score);
            }
            Ok(Some(score))
        })
        .collect::<Result<Vec<_>>>()?;

    if answers.len() > QUIZ_QUESTION_COUNT {
        anyhow::bail!(
            "Too many answers: {} (max {})",
            answers.len(),
            QUIZ_QUESTION_COUNT
        );
    }
    Ok(answers)
}

/// 투자 성향 설문 결과.
pub fn quiz(answers: &[Option<u8>], format: OutputFormat) -> Result<String> {
    let total_score: u32 = answers.iter().flatten().map(|&s| u32::from(s)).sum();
    let personality = Personality::from_quiz_answers(answers);
    let result = QuizResult {
        total_score,
        personality,
        title: personality.title(),
    };

    match format {
        OutputFormat::Json => to_json(&result),
        OutputFormat::Table => {
            let prefs = personality.preference_values();
            Ok(format!(
                "총점: {}점\n투자 성향: {}\n\
                 선호 기준: PER < {}, PBR < {}, EPS > {}\n\
                 체크리스트 통과 기준: {} 이상",
                total_score,
                result.title,
                prefs.per.normalize(),
                prefs.pbr.normalize(),
                prefs.eps.normalize(),
                pct(personality.required_pass_rate())
            ))
        }
    }
}

/// `KEY` 목록을 파싱합니다.
pub fn parse_indicator_keys(keys: &[String]) -> Result<Vec<IndicatorKey>> {
    keys.iter()
        .map(|k| k.parse::<IndicatorKey>().map_err(anyhow::Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_classify_table() {
        let out = classify(&Fundamentals::new(dec!(8), dec!(0.9), dec!(2500)), OutputFormat::Table)
            .unwrap();
        assert_eq!(out.matches("PASS").count(), 6);
    }

    #[test]
    fn test_checklist_includes_mandatory() {
        let out = checklist(
            ChecklistConfig {
                personality: Some(Personality::Aggressive),
                preferences: IndicatorPreferences::new([IndicatorKey::Per]),
                entries: vec!["PER=12".into(), "PBR=1.5".into(), "EPS=-300".into()],
            },
            OutputFormat::Json,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["passed"], 2);
        assert_eq!(value["evaluated"], 3);
        assert_eq!(value["passedOverall"], true);
    }

    #[test]
    fn test_checklist_table_marks_mandatory() {
        let out = checklist(
            ChecklistConfig {
                personality: Some(Personality::Aggressive),
                preferences: IndicatorPreferences::new([IndicatorKey::Per]),
                entries: vec!["PER=12".into(), "PBR=1.5".into()],
            },
            OutputFormat::Table,
        )
        .unwrap();

        assert_eq!(out.matches("[필수]").count(), 2);
        let per_line = out.lines().find(|line| line.contains("PER <")).unwrap();
        assert!(!per_line.contains("[필수]"));
    }

    #[test]
    fn test_checklist_rejects_bad_entry() {
        let result = checklist(
            ChecklistConfig {
                personality: None,
                preferences: IndicatorPreferences::default(),
                entries: vec!["PBR:1.5".into()],
            },
            OutputFormat::Table,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_quiz() {
        let answers = parse_answers("5,4,3,,5,4,5").unwrap();
        assert_eq!(answers[3], None);

        let out = quiz(&answers, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["totalScore"], 26);
        assert_eq!(value["personality"], "aggressive");

        assert!(parse_answers("6").is_err());
        assert!(parse_answers("1,1,1,1,1,1,1,1").is_err());
    }
}
