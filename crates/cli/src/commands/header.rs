//! Header command.

use std::io::Write;

use jewelry_shop_storefront::state::ShopSession;
use jewelry_shop_storefront::views::HeaderView;

use super::CommandResult;

/// Print the shop header with cart and wishlist counts.
pub fn show(session: &ShopSession, out: &mut impl Write) -> CommandResult {
    let text = HeaderView::for_session(session).render_text()?;
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}
