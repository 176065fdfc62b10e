//! folio demo
//!
//! Builds the sample portfolio page headlessly, bootstraps the
//! navigation controller, and scripts a short interaction.

use anyhow::Result;
use folio_dom::events::{InputEvent, Key, KeyModifiers};
use folio_dom::{Document, Rect};
use folio_nav::bootstrap;

const SECTIONS: [&str; 4] = ["about", "skills", "projects", "contact"];
const SECTION_HEIGHT: f64 = 800.0;

fn portfolio_page() -> Document {
    let mut doc = Document::new(600.0, 800.0);
    let body = doc.body();

    let navbar = doc.create_element("nav");
    doc.element_mut(navbar).classes.add("navbar");
    doc.append_child(body, navbar);

    let container = doc.create_element("div");
    doc.element_mut(container).classes.add("nav-container");
    doc.append_child(navbar, container);

    let menu = doc.create_element("ul");
    doc.element_mut(menu).classes.add("nav-menu");
    doc.append_child(container, menu);

    for (i, id) in SECTIONS.iter().enumerate() {
        let link = doc.create_element("a");
        {
            let el = doc.element_mut(link);
            el.classes.add("nav-link");
            el.set_attribute("href", &format!("#{id}"));
        }
        doc.append_child(menu, link);

        let section = doc.create_element("section");
        {
            let el = doc.element_mut(section);
            el.set_id(id);
            el.rect = Rect::from_xywh(0.0, SECTION_HEIGHT * i as f64, 600.0, SECTION_HEIGHT);
        }
        doc.append_child(body, section);
    }

    let toggle = doc.create_element("button");
    doc.element_mut(toggle).set_id("theme-toggle");
    doc.append_child(container, toggle);
    let icon = doc.create_element("span");
    doc.element_mut(icon).set_id("theme-icon");
    doc.append_child(toggle, icon);

    doc
}

fn main() -> Result<()> {
    env_logger::init();

    let mut doc = portfolio_page();
    let mut nav = bootstrap(&mut doc);

    // Scroll through the page.
    for step in 1..=6 {
        let y = step as f64 * 550.0;
        nav.handle_event(&mut doc, InputEvent::Scroll { y });
        nav.advance(&mut doc, 40);
        log::info!(
            "scrolled to {y}, active section: {:?}",
            nav.current_section()
        );
    }

    // Jump back to projects through its nav link.
    if let Some(link) = doc.query_selector_all(".nav-link").get(2).copied() {
        nav.handle_event(&mut doc, InputEvent::Click { target: link });
        nav.advance(&mut doc, 1000);
        log::info!(
            "clicked projects link, scroll requests so far: {}",
            doc.scroll_requests().len()
        );
    }

    // Toggle the theme with the keyboard shortcut.
    nav.handle_event(
        &mut doc,
        InputEvent::KeyDown { key: Key::Char('t'), modifiers: KeyModifiers::NONE },
    );
    nav.advance(&mut doc, 300);
    log::info!("theme is now {:?}", nav.current_theme());

    // Exercise the mobile menu, then leave mobile widths behind.
    if let Some(toggle) = doc.query_selector(".nav-toggle") {
        nav.handle_event(&mut doc, InputEvent::Click { target: toggle });
        log::info!("mobile menu open: {}", nav.is_menu_open());
    }
    nav.handle_event(&mut doc, InputEvent::Resize { width: 1280.0, height: 800.0 });
    log::info!("after resize to desktop, menu open: {}", nav.is_menu_open());

    nav.destroy(&mut doc);
    Ok(())
}
