pub mod alerts;
pub mod config;
pub mod cycle;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instruments;
pub mod payoff;
pub mod projection;
pub mod report;
pub mod statement;
pub mod types;

// re-export key types
pub use alerts::{PortfolioAlert, RiskAlertGenerator, RiskSignals};
pub use config::{EngineConfig, PayoffConfig, ProjectionConfig, RecordDefaults};
pub use cycle::DueCycle;
pub use decimal::{Money, Rate};
pub use engine::PortfolioEngine;
pub use errors::{EngineError, Result};
pub use events::{HistoryTotals, LoanEvent, LoanHistory};
pub use instruments::{
    CardInstrument, CardInstrumentBuilder, CardRecord, LoanInstrument, LoanInstrumentBuilder,
    LoanRecord, RawMinimumPayment,
};
pub use payoff::{PayoffCandidate, PayoffPrioritizer, PayoffRecommendation};
pub use projection::{
    AmortizationSimulator, CardPortfolioTotals, HorizonSnapshot, LoanPortfolioReport,
    LoanProjection, LoanProjector, LoanRow, PayoffDate, ProjectionRow, ProjectionSummary,
    SimulationParams,
};
pub use report::{CardView, PortfolioReport};
pub use statement::CardStatement;
pub use types::{
    InstrumentId, InstrumentKind, LoanCadence, MinimumPaymentPolicy, PayoffStrategy, Severity,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
