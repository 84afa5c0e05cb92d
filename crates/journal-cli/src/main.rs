//! 매매일지 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 매수 기록 추가
//! tradelog add -s 005930 -n 삼성전자 --buy-price 70000 --buy-qty 10 --buy-date 2024-01-02
//!
//! # 청산
//! tradelog close --id <ID> --price 77000 --qty 10 --date 2024-02-01
//!
//! # 성과 분석 (매수 시점 지표 분류 포함)
//! tradelog analyze --fundamentals data/fundamentals.json
//!
//! # 체크리스트
//! tradelog checklist --personality aggressive -i PER=12 -i PBR=1.5 -i EPS=3000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use journal_analytics::{
    CachedFundamentals, FundamentalsProvider, InMemoryFundamentals, RiskChecklistInput,
};
use journal_core::{
    init_logging, AppConfig, Currency, Fundamentals, IndicatorPreferences, JsonTradeLog,
    LogFormat, Personality, TradeLogRepository, DEFAULT_CONFIG_PATH,
};
use rust_decimal::Decimal;
use tracing::{debug, error};

use journal_cli::commands::{self, analyze, indicators, review, risk, trades};
use journal_cli::output::{pct, DisplayOptions, OutputFormat};

#[derive(Parser)]
#[command(name = "tradelog")]
#[command(about = "Trading journal CLI - 매매 기록, 성과 분석, 지표 체크리스트", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본값: config/default.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 매매 기록 파일 (설정값보다 우선)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// 출력 형식 (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    format: String,

    /// 표시 통화 (KRW, USD)
    #[arg(long, global = true)]
    currency: Option<String>,

    /// 원/달러 환율
    #[arg(long, global = true)]
    exchange_rate: Option<Decimal>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 매매 기록 추가
    Add {
        /// 종목 코드 (예: 005930)
        #[arg(short, long)]
        symbol: String,

        /// 종목명
        #[arg(short, long)]
        name: String,

        /// 매수 단가
        #[arg(long)]
        buy_price: Decimal,

        /// 매수 수량
        #[arg(long)]
        buy_qty: u64,

        /// 매수일 (YYYY-MM-DD)
        #[arg(long)]
        buy_date: String,

        /// 매도 단가 (청산된 거래를 바로 입력할 때)
        #[arg(long, requires_all = ["sell_qty", "sell_date"])]
        sell_price: Option<Decimal>,

        /// 매도 수량
        #[arg(long, requires_all = ["sell_price", "sell_date"])]
        sell_qty: Option<u64>,

        /// 매도일 (YYYY-MM-DD)
        #[arg(long, requires_all = ["sell_price", "sell_qty"])]
        sell_date: Option<String>,

        /// 매매 근거
        #[arg(short, long)]
        rationale: Option<String>,

        /// 근거 태그 (여러 번 지정 가능)
        #[arg(short, long)]
        tag: Vec<String>,
    },

    /// 미청산 기록에 매도 정보 입력
    Close {
        /// 매매 기록 ID
        #[arg(long)]
        id: String,

        /// 매도 단가
        #[arg(long)]
        price: Decimal,

        /// 매도 수량
        #[arg(long)]
        qty: u64,

        /// 매도일 (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },

    /// 매매 기록 삭제
    Delete {
        /// 매매 기록 ID
        #[arg(long)]
        id: String,
    },

    /// 매매 기록 목록
    List {
        /// 미청산 기록만 표시
        #[arg(long, default_value = "false")]
        open_only: bool,
    },

    /// 청산 거래 성과 분석
    Analyze {
        /// 재무 스냅샷 JSON 파일 (설정값보다 우선)
        #[arg(long)]
        fundamentals: Option<PathBuf>,
    },

    /// PER/PBR/EPS 가치주·성장주 분류
    Classify {
        #[arg(long, allow_hyphen_values = true)]
        per: Decimal,

        #[arg(long, allow_hyphen_values = true)]
        pbr: Decimal,

        #[arg(long, allow_hyphen_values = true)]
        eps: Decimal,
    },

    /// 투자 성향별 체크리스트 평가
    Checklist {
        /// 투자 성향 (conservative, moderate, aggressive)
        #[arg(short, long)]
        personality: Option<String>,

        /// 추가로 켤 지표 (설정값 대신 사용, 필수 지표는 자동 포함)
        #[arg(long = "enable")]
        enable: Vec<String>,

        /// 지표 값 (KEY=VALUE, 예: PBR=1.5)
        #[arg(short, long = "indicator", allow_hyphen_values = true)]
        indicators: Vec<String>,
    },

    /// 선호 기준에 따른 매매 복기
    Review {
        /// 매매 기록 ID
        #[arg(long)]
        id: String,

        /// 투자 성향 (설정값보다 우선)
        #[arg(short, long)]
        personality: Option<String>,

        /// 재무 스냅샷 JSON 파일 (설정값보다 우선)
        #[arg(long)]
        fundamentals: Option<PathBuf>,
    },

    /// 매매 전 리스크 체크
    Risk {
        /// 진입가
        #[arg(long)]
        entry: Decimal,

        /// 손절가
        #[arg(long)]
        stop: Decimal,

        /// 목표가
        #[arg(long)]
        target: Decimal,

        /// 수량
        #[arg(long)]
        qty: u64,

        /// 계좌 규모
        #[arg(long)]
        acct: Decimal,

        /// 허용 리스크 (%, 0.1 ~ 5)
        #[arg(long, default_value = "1")]
        max_risk_pct: Decimal,
    },

    /// 투자 성향 설문 (문항별 1-5점, 쉼표 구분)
    Quiz {
        #[arg(short, long)]
        answers: String,
    },
}

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // .env 파일은 없어도 됩니다
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AppConfig::load_default()
            .with_context(|| format!("Failed to load config: {}", DEFAULT_CONFIG_PATH))?,
    };
    if let Some(ref log_format) = cli.log_format {
        config.logging.format = log_format.parse::<LogFormat>()?;
    }
    init_logging(&config.logging)?;
    debug!(config = ?config, "Configuration loaded");

    let format = OutputFormat::parse(&cli.format)?;
    let mut display = DisplayOptions::from(&config.display);
    if let Some(ref currency) = cli.currency {
        display.currency = currency.parse::<Currency>()?;
    }
    if cli.exchange_rate.is_some() {
        display.exchange_rate = cli.exchange_rate;
    }

    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| config.journal.store_path.clone());

    let output = match cli.command {
        Commands::Add {
            symbol,
            name,
            buy_price,
            buy_qty,
            buy_date,
            sell_price,
            sell_qty,
            sell_date,
            rationale,
            tag,
        } => {
            let sell = match (sell_price, sell_qty, sell_date) {
                (Some(price), Some(qty), Some(date)) => {
                    Some((price, qty, commands::parse_date(&date)?))
                }
                _ => None,
            };
            let mut store = JsonTradeLog::open(&store_path)?;
            let record = trades::add_trade(
                &mut store,
                trades::AddTradeConfig {
                    symbol,
                    name,
                    buy_price,
                    buy_quantity: buy_qty,
                    buy_date: commands::parse_date(&buy_date)?,
                    sell,
                    rationale,
                    tags: tag,
                },
            )?;
            format!("매매 기록 추가 완료: {}", record.id)
        }

        Commands::Close {
            id,
            price,
            qty,
            date,
        } => {
            let mut store = JsonTradeLog::open(&store_path)?;
            let record =
                trades::close_trade(&mut store, &id, price, qty, commands::parse_date(&date)?)?;
            match record.profit_rate() {
                Some(rate) => format!("청산 완료: {} (수익률 {})", record.id, pct(rate)),
                None => format!("청산 완료: {}", record.id),
            }
        }

        Commands::Delete { id } => {
            let mut store = JsonTradeLog::open(&store_path)?;
            let record = trades::delete_trade(&mut store, &id)?;
            format!("삭제 완료: {} {}", record.symbol, record.id)
        }

        Commands::List { open_only } => {
            let store = JsonTradeLog::open(&store_path)?;
            trades::format_trades(&store.list()?, format, &display, open_only)?
        }

        Commands::Analyze { fundamentals } => {
            let store = JsonTradeLog::open(&store_path)?;
            let records = store.list()?;
            let snapshot_path = fundamentals.or_else(|| config.fundamentals.snapshot_path.clone());

            match snapshot_path {
                Some(path) => {
                    let provider = load_provider(&path, config.fundamentals.cache_ttl_secs)?;
                    analyze::analyze(
                        &records,
                        Some(&provider as &dyn FundamentalsProvider),
                        format,
                        &display,
                    )?
                }
                None => analyze::analyze(&records, None, format, &display)?,
            }
        }

        Commands::Classify { per, pbr, eps } => {
            indicators::classify(&Fundamentals::new(per, pbr, eps), format)?
        }

        Commands::Checklist {
            personality,
            enable,
            indicators: entries,
        } => {
            let personality = match personality {
                Some(p) => Some(p.parse::<Personality>()?),
                None => config.journal.personality,
            };
            let preferences = if enable.is_empty() {
                config.journal.indicators.clone()
            } else {
                IndicatorPreferences::new(indicators::parse_indicator_keys(&enable)?)
            };
            indicators::checklist(
                indicators::ChecklistConfig {
                    personality,
                    preferences,
                    entries,
                },
                format,
            )?
        }

        Commands::Review {
            id,
            personality,
            fundamentals,
        } => {
            let personality = match personality {
                Some(p) => Some(p.parse::<Personality>()?),
                None => config.journal.personality,
            };
            let path = fundamentals
                .or_else(|| config.fundamentals.snapshot_path.clone())
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "Fundamentals file required: \
                         use --fundamentals or set fundamentals.snapshot_path"
                    )
                })?;
            let provider = load_provider(&path, config.fundamentals.cache_ttl_secs)?;
            let store = JsonTradeLog::open(&store_path)?;
            review::review(&store, &id, &provider, personality, format, &display)?
        }

        Commands::Risk {
            entry,
            stop,
            target,
            qty,
            acct,
            max_risk_pct,
        } => risk::risk(
            &RiskChecklistInput {
                entry,
                stop,
                target,
                quantity: qty,
                account_size: acct,
                max_risk_pct,
            },
            format,
            &display,
        )?,

        Commands::Quiz { answers } => {
            let answers = indicators::parse_answers(&answers)?;
            indicators::quiz(&answers, format)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn load_provider(path: &Path, ttl_secs: u64) -> Result<CachedFundamentals<InMemoryFundamentals>> {
    let provider = InMemoryFundamentals::from_json_file(path)
        .with_context(|| format!("Failed to load fundamentals: {}", path.display()))?;
    Ok(CachedFundamentals::new(provider, Duration::from_secs(ttl_secs)))
}
