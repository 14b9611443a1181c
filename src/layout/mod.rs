//! Page geometry and pagination.

mod page;
mod session;

pub use page::{page_count, PageGeometry, DEFAULT_MAX_ROWS_PER_PAGE, PAGE_ROW_ALLOWANCE};
pub use session::{RenderSession, RowRange};
