pub mod aggregate;
pub mod status;

pub use aggregate::{
    has_approved_quote, CreateQuoteDto, QuoteAction, QuoteActionDto, QuoteDto, QuoteItemDto, QuoteItemResponse,
};
pub use status::QuoteStatus;
