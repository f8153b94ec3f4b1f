//! # `finboard-chart` - 图表适配层
//!
//! 负责把标签化的数据序列转换为渲染器调用，并维护每个图表槽位
//! 的生命周期：每次数据刷新都先销毁旧实例再创建新实例。

pub mod palette;
pub mod series;
pub mod slot;
pub mod terminal;

pub use palette::{FixedPalette, RandomPalette};
pub use slot::{ChartSlot, SlotState};
pub use terminal::TerminalRenderer;
