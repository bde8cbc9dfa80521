mod assessor;
mod common;
mod summary;
