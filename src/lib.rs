pub mod args;
pub mod handicap;
pub mod model;
pub mod controller {
    pub mod games;
    pub mod golfers;
    pub mod import;
    pub mod rounds;
}
pub mod live {
    pub mod hub;
    pub mod socket;
}

pub use handicap::normalize_handicap;
