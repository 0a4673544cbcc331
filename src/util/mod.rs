pub mod command;
pub mod paths;
pub mod scope;

#[cfg(test)]
pub(crate) mod testing;
