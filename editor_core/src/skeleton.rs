//! Built-in page section templates

/// Markup and matching styles appended to a project on request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skeleton {
    pub id: &'static str,
    pub name: &'static str,
    pub markup: &'static str,
    pub style: &'static str,
}

pub const HERO: Skeleton = Skeleton {
    id: "hero",
    name: "Hero Section",
    markup: "<section class=\"hero\">
  <div class=\"container\">
    <h1>Modern Solutions</h1>
    <p>Build your next idea in minutes</p>
    <button>Get Started</button>
  </div>
</section>",
    style: ".hero { height: 80vh; display: flex; align-items: center; justify-content: center; background: #f8fafc; text-align: center; }
.container { max-width: 800px; padding: 2rem; }
h1 { font-size: 3.5rem; color: #1e293b; margin-bottom: 1rem; }
p { font-size: 1.25rem; color: #64748b; margin-bottom: 2rem; }
button { background: #6366f1; color: white; border: none; padding: 1rem 2rem; border-radius: 0.5rem; font-weight: 600; cursor: pointer; }",
};

pub const CARD_GRID: Skeleton = Skeleton {
    id: "card-grid",
    name: "Feature Grid",
    markup: "<div class=\"grid\">
  <div class=\"card\"><h3>Fast</h3><p>Optimized for speed.</p></div>
  <div class=\"card\"><h3>Smart</h3><p>Completes as you type.</p></div>
  <div class=\"card\"><h3>Live</h3><p>Real-time updates.</p></div>
</div>",
    style: ".grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 2rem; padding: 4rem; }
.card { padding: 2rem; border: 1px solid #e2e8f0; border-radius: 1rem; background: white; box-shadow: 0 4px 6px -1px rgb(0 0 0 / 0.1); }
h3 { color: #6366f1; margin-bottom: 0.5rem; }",
};

pub const SKELETONS: &[Skeleton] = &[HERO, CARD_GRID];

pub fn find(id: &str) -> Option<&'static Skeleton> {
    SKELETONS.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        assert_eq!(find("hero").map(|s| s.name), Some("Hero Section"));
        assert_eq!(find("card-grid").map(|s| s.name), Some("Feature Grid"));
        assert!(find("footer").is_none());
    }

    #[test]
    fn test_templates_are_balanced() {
        let hero_close = markup_assist::find_matching_close(HERO.markup, 0, "section");
        assert_eq!(hero_close, HERO.markup.rfind("</section>"));

        let grid_close = markup_assist::find_matching_close(CARD_GRID.markup, 0, "div");
        assert_eq!(grid_close, CARD_GRID.markup.rfind("</div>"));
    }
}
