pub mod cinemas;
pub mod movies;
pub mod seed;
pub mod ticket_expiry;
pub mod tickets;
pub mod users;

pub use cinemas::CinemaService;
pub use movies::{MovieCategory, MovieService, Pagination};
pub use tickets::TicketService;
pub use users::UserService;
