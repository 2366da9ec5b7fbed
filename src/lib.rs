//! refind - 编辑器正则查找替换适配层
//!
//! 把编辑器的查找/替换约定翻译成 regress 引擎的原生语法：
//! - translate: 模式翻译（`\<` `\>` 词边界简写、整词/词首包裹、行尾语义）
//! - options: 搜索标志到引擎编译选项的纯函数派生
//! - finder: 方向搜索驱动（向后搜索由重复向前探测模拟）与编译缓存
//! - replace: 替换模板解码与反向引用展开
//! - document: 宿主文本缓冲区的只读边界（str 与 ropey::Rope）

pub mod document;
mod engine;
pub mod escapes;
pub mod finder;
pub mod options;
pub mod replace;
pub mod translate;

pub use document::Document;
pub use finder::{RegexSearcher, Result, SearchError, SearchHit};
pub use options::{EolMode, SearchOptions, SearchRequest};
pub use replace::decode_replacement;
pub use translate::translate_pattern;
