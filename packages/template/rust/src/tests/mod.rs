/* packages/template/rust/src/tests/mod.rs */

mod helpers;
mod locale;
