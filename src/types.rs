//! Closed scan/bind mappings for the built-in domain types.
//!
//! | Domain | Binds to | Scans from |
//! |---|---|---|
//! | `i64` `i32` `i16` `u8` `u16` `u32` | `Int` | `Int` (range-checked), `Bool` |
//! | `bool` | `Bool` | `Bool`, `Int` 0/1 |
//! | `f64` `f32` | `Float` | `Float`, `Int` when exact |
//! | `String` | `Text` | `Text`, UTF-8 `Blob` |
//! | `Vec<u8>` | `Blob` | `Blob`, `Text` |
//! | `NaiveDateTime` `NaiveDate` `DateTime<Utc>` | `Timestamp` | `Timestamp`, `Text` |
//! | `serde_json::Value` | `Text` | `Text`, `Blob` |

mod boolean;
mod json;
mod numeric;
mod temporal;
mod text;

