//! Рантайм-слой хоста поверх ядра:
//! - `MatchSession` - единственный владелец состояния, сохранение и публикация снапшотов;
//! - `run_ticker` - периодический планировщик `AdvanceTick`.
//!
//! Ядро (`engine`) ничего отсюда не знает.

pub mod session;
pub mod ticker;

pub use session::{DispatchReport, MatchSession, NoopSignalSink, SharedSession, SignalSink};
pub use ticker::{run_ticker, DEFAULT_TICK_PERIOD};
