//! Equation extraction strategies
//!
//! Each strategy is a pure function from the body XML to records, tried in
//! priority order by the loader.

pub(crate) mod inline;
pub(crate) mod objects;
pub(crate) mod omml;
