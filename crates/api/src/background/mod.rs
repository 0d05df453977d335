pub mod concert_poller;

pub use concert_poller::{CheckOutcome, ConcertPoller};
