pub mod cinema;
pub mod movie;
pub mod ticket;
pub mod user;

pub use cinema::{Cinema, ShowtimeVenue};
pub use movie::{CastMember, Genre, Movie, MovieDetail, MoviePage, MovieStatus, ShowtimeListing};
pub use ticket::{Ticket, TicketStatus, TicketStatusFilter, TicketView, UnknownTicketStatus};
pub use user::{NewUser, User};
