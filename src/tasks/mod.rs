pub mod poller;

#[cfg(test)]
pub mod testing;
