use crate::app::App;
use crate::state::Phase;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Cow avoids allocating for the static hints
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.filter_mode {
        Cow::Borrowed("Type to filter | ESC clear | ENTER keep")
    } else {
        match app.state.phase() {
            Phase::Loading => Cow::Borrowed("Loading... [v]iew [?]help [q]uit"),
            Phase::Failed(_) => Cow::Owned(format!("[r] {} [?]help [q]uit", app.retry_label())),
            Phase::Loaded => Cow::Borrowed(
                "[j/k]select [/]filter [v]iew [r]efresh [o]pen image [T]heme [?]help [q]uit",
            ),
        }
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
