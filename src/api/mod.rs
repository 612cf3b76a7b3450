// ===============================
// src/api/mod.rs
// ===============================
//
// Action modules: tiap method = satu action path + skema parameter,
// lalu delegasi ke YunxinClient::call.
//
mod history;
mod room;

pub use history::History;
pub use room::{MemberQueryType, MemberRole, MsgType, Room};
