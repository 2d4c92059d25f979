//! Generated `<title>` children

use super::Symbol;

/// Give the symbol a title equal to its id
///
/// Does nothing when disabled or when the source declares its own title.
pub fn inject_title(symbol: &mut Symbol, enabled: bool) {
    if !enabled || symbol.declares_title {
        return;
    }
    symbol.title = Some(symbol.id.clone());
}
