//! # 带标记负载的 Petri 网执行核心
//!
//! 网由库所集合 `P`、迁移集合 `T`、计算值 `c` 与执行历史 `H` 组成。每个库所
//! 持有以标识符为键的标记（Marker），标记封装任意领域值 `V`。
//!
//! * 迁移 `t ∈ T` 是纯函数 `(P, c) ↦ (P', c', consumed, created)`；守卫条件不成立时
//!   必须原样返回输入并报告 `(0, 0)`；
//! * 一个 **发射轮次** 按优先级降序（同优先级按插入顺序）依次执行全部迁移，
//!   后一个迁移观察前一个迁移的结果；
//! * 报告 `consumed + created > 0` 的迁移使版本号加一，并向历史压入
//!   `(时间戳, 迁移标识, 版本)`；
//! * 所有操作都返回新网，旧网及其历史保持可观察且不变。
//!
//! ## 示例
//!
//! ```rust
//! use pnflow::net::*;
//!
//! let step = |places: Places<String>, computed: u32| {
//!     let (Some(a), Some(b)) = (places.get("A"), places.get("B")) else {
//!         return Outcome::unchanged(places, computed);
//!     };
//!     let Some(token) = a.marker("m1").cloned() else {
//!         return Outcome::unchanged(places, computed);
//!     };
//!     let mut next = places.clone();
//!     next.insert("A".into(), a.without_markers(["m1"]));
//!     next.insert("B".into(), b.with_added_markings(index_markers([token])));
//!     Outcome::new(next, computed + 1, 1, 1)
//! };
//!
//! let net = Net::new("demo", 0u32)
//!     .with_places(index_places([Place::new("A"), Place::new("B")]))
//!     .with_transitions(index_transitions([Transition::new("T", 1, step)]))
//!     .with_markings_by_place_id(MarkingsByPlace::from([(
//!         "A".to_owned(),
//!         index_markers([Marker::new("m1", "payload".to_owned())]),
//!     )]));
//!
//! let fired = net.execute_transitions_by_priority();
//! assert!(fired.place("A").unwrap().is_empty());
//! assert!(fired.place("B").unwrap().contains("m1"));
//! assert_eq!(fired.last_version(), 1);
//! assert_eq!(net.last_version(), 0);
//! ```

pub mod core;
pub mod history;
pub mod stack;
pub mod structure;
pub mod transition;

pub use self::core::{FireError, MarkingsByPlace, Net, Settled};
pub use history::{History, HistoryEntry, RESET_LABEL, Version};
pub use stack::PersistentStack;
pub use structure::{Marker, Markings, Place, Places, index_markers, index_places};
pub use transition::{Executor, Outcome, Priority, Transition, Transitions, index_transitions};
