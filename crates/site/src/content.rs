//! Landing-page copy: stored documents with built-in fallbacks.
//!
//! Each section renders the stored `site_content` document when it holds
//! real copy and the built-in copy below otherwise. A list document only
//! counts when at least one entry has a title (or name); blank entries are
//! dropped, so a freshly seeded editor skeleton never blanks out a section.

use craftpage_core::content::{
    ContentSet, ContentSlot, FeatureItem, HeroContent, PricingPlan, SlotContent, TestimonialItem,
};

const HERO_IMAGE: &str = "https://images.unsplash.com/photo-1485433592409-9018e83a1f0d?q=80&w=1814&auto=format&fit=crop";

/// Everything the landing page template needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingContent {
    pub hero: Hero,
    pub features: Vec<Feature>,
    pub testimonials: Vec<Testimonial>,
    pub plans: Vec<Plan>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    pub badge: &'static str,
    pub title: String,
    pub subtitle: String,
    pub cta: String,
    pub secondary_cta: &'static str,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub title: String,
    pub description: String,
    /// Glyph for the stored icon name.
    pub glyph: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testimonial {
    pub name: String,
    pub title: String,
    pub company: String,
    pub review: String,
    pub avatar: Option<String>,
    pub initials: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub name: String,
    pub description: String,
    pub monthly_price: String,
    pub yearly_price: String,
    pub features: Vec<String>,
    pub cta: String,
    pub popular: bool,
}

impl LandingContent {
    /// Built-in copy for every section.
    #[must_use]
    pub fn fallback() -> Self {
        Self::resolve(&ContentSet::default())
    }

    /// Resolve every section against the stored documents.
    #[must_use]
    pub fn resolve(stored: &ContentSet) -> Self {
        let decoded = |slot| SlotContent::decode(slot, stored.get(slot));

        let hero = match decoded(ContentSlot::Hero) {
            Some(SlotContent::Hero(hero)) => Hero::merged(&hero),
            _ => Hero::default(),
        };

        let features = match decoded(ContentSlot::Features) {
            Some(SlotContent::Features(items)) => non_blank(items, |f| &f.title),
            _ => Vec::new(),
        };
        let features = if features.is_empty() {
            default_features()
        } else {
            features.iter().map(Feature::from).collect()
        };

        let testimonials = match decoded(ContentSlot::Testimonials) {
            Some(SlotContent::Testimonials(items)) => non_blank(items, |t| &t.name),
            _ => Vec::new(),
        };
        let testimonials = if testimonials.is_empty() {
            default_testimonials()
        } else {
            testimonials.iter().map(Testimonial::from).collect()
        };

        let plans = match decoded(ContentSlot::Pricing) {
            Some(SlotContent::Pricing(items)) => non_blank(items, |p| &p.name),
            _ => Vec::new(),
        };
        let plans = if plans.is_empty() {
            default_plans()
        } else {
            plans
                .iter()
                .enumerate()
                .map(|(index, plan)| Plan::from_stored(index, plan))
                .collect()
        };

        Self {
            hero,
            features,
            testimonials,
            plans,
        }
    }
}

fn non_blank<T>(items: Vec<T>, key: impl Fn(&T) -> &String) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| !key(item).trim().is_empty())
        .collect()
}

fn or_default(stored: &str, default: &str) -> String {
    let trimmed = stored.trim();
    if trimmed.is_empty() {
        default.to_owned()
    } else {
        trimmed.to_owned()
    }
}

// =============================================================================
// Hero
// =============================================================================

impl Default for Hero {
    fn default() -> Self {
        Self {
            badge: "v1.0 is now live",
            title: "Craft layout in minutes.".to_owned(),
            subtitle: "Build beautiful, responsive landing pages with our easy-to-use \
                       component library. Designed for speed (and comfort)."
                .to_owned(),
            cta: "Get Started".to_owned(),
            secondary_cta: "Learn More",
            image_url: HERO_IMAGE.to_owned(),
        }
    }
}

impl Hero {
    /// Stored fields override the built-in ones; blank fields keep them.
    fn merged(stored: &HeroContent) -> Self {
        let base = Self::default();
        Self {
            title: or_default(&stored.title, &base.title),
            subtitle: or_default(&stored.subtitle, &base.subtitle),
            cta: or_default(&stored.cta, &base.cta),
            image_url: or_default(&stored.image_url, &base.image_url),
            ..base
        }
    }
}

// =============================================================================
// Features
// =============================================================================

/// Map an icon name from the editor to a glyph; unknown names get the
/// lightning bolt.
#[must_use]
pub fn icon_glyph(name: &str) -> &'static str {
    match name.trim() {
        "Smartphone" => "📱",
        "Monitor" => "🖥",
        "Search" => "🔍",
        "Accessibility" => "♿",
        "Moon" => "🌙",
        _ => "⚡",
    }
}

impl From<&FeatureItem> for Feature {
    fn from(item: &FeatureItem) -> Self {
        Self {
            title: item.title.trim().to_owned(),
            description: item.description.trim().to_owned(),
            glyph: icon_glyph(&item.icon),
        }
    }
}

fn default_features() -> Vec<Feature> {
    [
        (
            "Responsive Design",
            "Layouts that adapt seamlessly to any screen size, from desktop to mobile.",
            "Smartphone",
        ),
        (
            "Modern UI",
            "Built with the latest design trends and components for a premium look.",
            "Monitor",
        ),
        (
            "Fast Performance",
            "Optimized for speed with lightweight code and efficient rendering.",
            "Zap",
        ),
        (
            "SEO Optimized",
            "Structure and tags designed to help your site rank better in search results.",
            "Search",
        ),
        (
            "Accessibility",
            "Adheres to WAI-ARIA standards to ensure your site is usable by everyone.",
            "Accessibility",
        ),
        (
            "Dark Mode",
            "Built-in support for dark mode to reduce eye strain and save battery.",
            "Moon",
        ),
    ]
    .into_iter()
    .map(|(title, description, icon)| Feature {
        title: title.to_owned(),
        description: description.to_owned(),
        glyph: icon_glyph(icon),
    })
    .collect()
}

// =============================================================================
// Testimonials
// =============================================================================

impl From<&TestimonialItem> for Testimonial {
    fn from(item: &TestimonialItem) -> Self {
        let avatar = item.avatar.trim();
        Self {
            name: item.name.trim().to_owned(),
            title: item.title.trim().to_owned(),
            company: item.company.trim().to_owned(),
            review: item.review.trim().to_owned(),
            avatar: (!avatar.is_empty()).then(|| avatar.to_owned()),
            initials: item.initials(),
        }
    }
}

fn default_testimonials() -> Vec<Testimonial> {
    [
        (
            "Alex Johnson",
            "CTO",
            "TechFlow",
            "This library has saved us hundreds of hours of development time. The components are top-notch and easy to customize.",
            "photo-1472099645785-5658abf4ff4e",
        ),
        (
            "Sarah Williams",
            "Product Designer",
            "Creative Studio",
            "The attention to detail in the design is incredible. It looks premium right out of the box and fits our brand perfectly.",
            "photo-1494790108377-be9c29b29330",
        ),
        (
            "Michael Brown",
            "Frontend Developer",
            "StartUp Inc",
            "Documentation is clear, and the code is clean. It's rare to find a library that balances flexibility and ease of use so well.",
            "photo-1599566150163-29194dcaad36",
        ),
        (
            "Emily Davis",
            "Marketing Director",
            "Growth Labs",
            "Our conversion rates increased by 20% after redesigning our landing page with these components. Highly recommended!",
            "photo-1580489944761-15a19d654956",
        ),
        (
            "David Wilson",
            "Founder",
            "NextGen Apps",
            "I was able to launch my MVP in a weekend thanks to this kit. It has everything you need to build a professional website.",
            "photo-1507003211169-0a1dd7228f2d",
        ),
    ]
    .into_iter()
    .map(|(name, title, company, review, photo)| {
        Testimonial::from(&TestimonialItem {
            name: name.to_owned(),
            title: title.to_owned(),
            company: company.to_owned(),
            review: review.to_owned(),
            avatar: format!(
                "https://images.unsplash.com/{photo}?w=100&h=100&fit=crop&crop=faces"
            ),
        })
    })
    .collect()
}

// =============================================================================
// Pricing
// =============================================================================

/// Call-to-action labels by plan position.
const PLAN_CTAS: [&str; 3] = ["Get Started", "Start Free Trial", "Contact Sales"];

impl Plan {
    fn from_stored(index: usize, plan: &PricingPlan) -> Self {
        Self {
            name: plan.name.trim().to_owned(),
            description: plan.description.trim().to_owned(),
            monthly_price: plan.monthly_price.trim().to_owned(),
            yearly_price: plan.yearly_price.trim().to_owned(),
            features: plan.feature_lines().map(str::to_owned).collect(),
            cta: PLAN_CTAS.get(index).copied().unwrap_or("Get Started").to_owned(),
            popular: plan.popular,
        }
    }
}

fn default_plans() -> Vec<Plan> {
    [
        (
            "Basic",
            "Perfect for individuals and small projects.",
            "9",
            "90",
            "Up to 3 projects\nBasic analytics\n1 GB storage\nEmail support\nCommunity access",
            false,
        ),
        (
            "Pro",
            "Best for growing teams and businesses.",
            "29",
            "290",
            "Unlimited projects\nAdvanced analytics\n50 GB storage\nPriority support\nCustom integrations\nTeam collaboration\nAPI access",
            true,
        ),
        (
            "Enterprise",
            "For large organizations with advanced needs.",
            "99",
            "990",
            "Everything in Pro\nUnlimited storage\n24/7 dedicated support\nCustom SLA\nSSO & SAML\nAudit logs\nOnboarding assistance",
            false,
        ),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (name, description, monthly, yearly, features, popular))| {
        Plan::from_stored(
            index,
            &PricingPlan {
                name: name.to_owned(),
                description: description.to_owned(),
                monthly_price: monthly.to_owned(),
                yearly_price: yearly.to_owned(),
                features: features.to_owned(),
                popular,
            },
        )
    })
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use craftpage_core::content::ContentRow;
    use serde_json::json;

    use super::*;

    fn stored(rows: &[(&str, &str, serde_json::Value)]) -> ContentSet {
        rows.iter()
            .map(|(section, key, value)| ContentRow {
                section: (*section).to_owned(),
                content_key: (*key).to_owned(),
                content_value: value.clone(),
            })
            .collect()
    }

    #[test]
    fn test_fallback_copy() {
        let content = LandingContent::fallback();
        assert_eq!(content.hero.title, "Craft layout in minutes.");
        assert_eq!(content.hero.badge, "v1.0 is now live");
        assert_eq!(content.features.len(), 6);
        assert_eq!(content.features[2].glyph, "⚡");
        assert_eq!(content.testimonials.len(), 5);
        assert_eq!(content.testimonials[0].initials, "AJ");
        assert_eq!(content.plans.len(), 3);
        assert!(content.plans[1].popular);
        assert_eq!(content.plans[2].cta, "Contact Sales");
        assert_eq!(content.plans[0].features.len(), 5);
    }

    #[test]
    fn test_stored_hero_overrides_non_blank_fields() {
        let content = LandingContent::resolve(&stored(&[(
            "hero",
            "main",
            json!({ "title": "Ship faster.", "subtitle": "", "cta": "Try it" }),
        )]));
        assert_eq!(content.hero.title, "Ship faster.");
        assert_eq!(content.hero.cta, "Try it");
        assert!(content.hero.subtitle.starts_with("Build beautiful"));
        assert_eq!(content.hero.image_url, HERO_IMAGE);
    }

    #[test]
    fn test_blank_seeded_features_keep_fallback() {
        let blank = json!({ "items": vec![json!({ "title": "", "description": "", "icon": "" }); 6] });
        let content = LandingContent::resolve(&stored(&[("features", "list", blank)]));
        assert_eq!(content.features[0].title, "Responsive Design");
    }

    #[test]
    fn test_stored_features_drop_blank_entries() {
        let value = json!({ "items": [
            { "title": "Fast", "description": "Really fast", "icon": "Moon" },
            { "title": "  ", "description": "", "icon": "" },
        ]});
        let content = LandingContent::resolve(&stored(&[("features", "list", value)]));
        assert_eq!(content.features.len(), 1);
        assert_eq!(content.features[0].glyph, "🌙");
    }

    #[test]
    fn test_malformed_document_falls_back() {
        let content = LandingContent::resolve(&stored(&[
            ("testimonials", "list", json!({ "items": "nope" })),
            ("pricing", "plans", json!([1, 2, 3])),
        ]));
        assert_eq!(content.testimonials.len(), 5);
        assert_eq!(content.plans[0].name, "Basic");
    }

    #[test]
    fn test_stored_testimonial_without_avatar_uses_initials() {
        let value = json!({ "items": [
            { "name": "Kim Minji", "title": "PM", "company": "Acme", "review": "Great", "avatar": "" }
        ]});
        let content = LandingContent::resolve(&stored(&[("testimonials", "list", value)]));
        assert_eq!(content.testimonials.len(), 1);
        assert_eq!(content.testimonials[0].avatar, None);
        assert_eq!(content.testimonials[0].initials, "KM");
    }

    #[test]
    fn test_stored_plans_split_feature_lines() {
        let value = json!({ "items": [
            { "name": "Solo", "description": "", "monthlyPrice": 5, "yearlyPrice": "50",
              "features": "One\n\n Two \n", "popular": false }
        ]});
        let content = LandingContent::resolve(&stored(&[("pricing", "plans", value)]));
        assert_eq!(content.plans.len(), 1);
        assert_eq!(content.plans[0].monthly_price, "5");
        assert_eq!(content.plans[0].features, vec!["One", "Two"]);
        assert_eq!(content.plans[0].cta, "Get Started");
    }
}
