pub mod ai;
pub mod ai_types;
pub mod capabilities;
pub mod delay;
pub mod fallback;
pub mod history;
pub mod lookup;
pub mod notify;
pub mod resolver;
pub mod session;
pub mod settings;
pub mod storage;
pub mod strategy;
