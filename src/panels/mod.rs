mod properties_panel;
mod tools_panel;

pub use properties_panel::properties_panel;
pub use tools_panel::tools_panel;
