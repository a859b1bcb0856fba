//! Landing-page generation: SEO meta tags, the remote preview path, and the
//! built-in fallback template used whenever the service can't be reached.

use crate::api::ApiClient;
use crate::theme::ThemeOption;

pub const DEFAULT_TRACKING_ID: &str = "G-XXXXXXXXXX";

const META_DESCRIPTION_LIMIT: usize = 160;
const META_KEYWORD_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTags {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

/// Where the document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
    /// Rendered by the remote preview service.
    Remote,
    /// Synthesized locally from the built-in template.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub html: String,
    pub meta_tags: MetaTags,
    pub analytics_id: Option<String>,
    pub source: PageSource,
}

/// Compute the SEO tags for a project. Pure and reproducible.
pub fn meta_tags(project_name: &str, project_description: &str) -> MetaTags {
    let title = format!("{project_name} - Professional Landing Page");

    let description = if project_description.chars().count() > META_DESCRIPTION_LIMIT {
        let head: String = project_description
            .chars()
            .take(META_DESCRIPTION_LIMIT - 3)
            .collect();
        format!("{head}...")
    } else {
        project_description.to_string()
    };

    // Lowercased project name first, then description words longer than
    // three characters, capped at ten entries total.
    let lowered = project_description.to_lowercase();
    let mut keywords = vec![project_name.to_lowercase()];
    keywords.extend(
        lowered
            .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .filter(|word| word.len() > 3)
            .map(str::to_string),
    );
    keywords.truncate(META_KEYWORD_LIMIT);

    MetaTags {
        title,
        description,
        keywords: keywords.join(", "),
    }
}

/// Generate the page for a project and theme. The remote service renders the
/// primary version; any failure falls back to the built-in template so the
/// wizard can always move forward.
pub fn generate(
    api: &ApiClient,
    project_name: &str,
    project_description: &str,
    theme: &ThemeOption,
) -> GeneratedPage {
    let tags = meta_tags(project_name, project_description);
    match api.preview(project_name, project_description, Some(&theme.name)) {
        Ok(resp) => GeneratedPage {
            html: resp.html,
            meta_tags: tags,
            analytics_id: None,
            source: PageSource::Remote,
        },
        Err(err) => {
            tracing::warn!("preview service unavailable, using built-in template: {err}");
            fallback_page(project_name, project_description, theme)
        }
    }
}

/// The locally synthesized document. Pure, deterministic, never fails.
pub fn fallback_page(
    project_name: &str,
    project_description: &str,
    theme: &ThemeOption,
) -> GeneratedPage {
    let meta = meta_tags(project_name, project_description);
    let analytics = analytics_snippet(DEFAULT_TRACKING_ID);
    let tagline = project_description
        .split('.')
        .next()
        .unwrap_or(project_description);
    let colors = &theme.colors;

    let html = format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <meta name="keywords" content="{keywords}">
    <meta property="og:title" content="{title}">
    <meta property="og:description" content="{description}">
    <meta property="og:type" content="website">
{analytics}
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}

        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: {text};
            background-color: {background};
        }}

        .container {{ max-width: 1200px; margin: 0 auto; padding: 0 20px; }}

        header {{
            background: linear-gradient(135deg, {primary} 0%, {secondary} 100%);
            color: white;
            padding: 100px 0;
            text-align: center;
        }}

        h1 {{ font-size: 3.5rem; font-weight: 700; margin-bottom: 20px; }}

        .tagline {{ font-size: 1.3rem; margin-bottom: 30px; opacity: 0.9; }}

        .cta-button {{
            display: inline-block;
            background-color: {accent};
            color: white;
            padding: 15px 30px;
            text-decoration: none;
            border-radius: 50px;
            font-weight: 600;
            font-size: 1.1rem;
        }}

        .features {{ padding: 80px 0; background-color: {background}; }}

        .features h2 {{
            text-align: center;
            font-size: 2.5rem;
            margin-bottom: 30px;
            color: {text};
        }}

        .features .lead {{
            text-align: center;
            font-size: 1.1rem;
            color: #666;
            max-width: 600px;
            margin: 0 auto;
        }}

        .features-grid {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
            gap: 40px;
            margin-top: 60px;
        }}

        .feature-card {{
            background: white;
            padding: 40px 30px;
            border-radius: 15px;
            box-shadow: 0 10px 30px rgba(0,0,0,0.1);
            text-align: center;
        }}

        .feature-card h3 {{ font-size: 1.5rem; margin-bottom: 15px; color: {text}; }}

        .feature-card p {{ color: #666; line-height: 1.8; }}

        footer {{
            background-color: {text};
            color: white;
            padding: 60px 0 20px;
            text-align: center;
        }}

        .footer-bottom {{
            padding-top: 20px;
            border-top: 1px solid rgba(255,255,255,0.2);
            color: rgba(255,255,255,0.7);
        }}

        .built-with {{ font-size: 0.9rem; margin-top: 10px; }}

        .built-with a {{ color: {accent}; text-decoration: none; }}
    </style>
</head>
<body>
    <header>
        <div class="container">
            <h1>{name}</h1>
            <p class="tagline">{tagline}.</p>
            <a href="#contact" class="cta-button">Get Started</a>
        </div>
    </header>

    <section class="features">
        <div class="container">
            <h2>Why Choose {name}?</h2>
            <p class="lead">{full_description}</p>

            <div class="features-grid">
                <div class="feature-card">
                    <h3>Fast &amp; Reliable</h3>
                    <p>Built with modern technology to ensure optimal performance and reliability for your needs.</p>
                </div>
                <div class="feature-card">
                    <h3>Innovative Solutions</h3>
                    <p>Cutting-edge features and functionalities designed to give you a competitive advantage.</p>
                </div>
                <div class="feature-card">
                    <h3>Results Focused</h3>
                    <p>Every feature is designed with your success in mind, delivering measurable results.</p>
                </div>
            </div>
        </div>
    </section>

    <footer id="contact">
        <div class="container">
            <div class="footer-bottom">
                <p>&copy; {name}. All rights reserved.</p>
                <p class="built-with">Built with <a href="https://pagecraft.dev" target="_blank">pagecraft</a></p>
            </div>
        </div>
    </footer>
</body>
</html>"##,
        title = meta.title,
        description = meta.description,
        keywords = meta.keywords,
        analytics = analytics,
        name = project_name,
        tagline = tagline,
        full_description = project_description,
        primary = colors.primary,
        secondary = colors.secondary,
        accent = colors.accent,
        text = colors.text,
        background = colors.background,
    );

    GeneratedPage {
        html,
        meta_tags: meta,
        analytics_id: Some(DEFAULT_TRACKING_ID.to_string()),
        source: PageSource::Fallback,
    }
}

fn analytics_snippet(tracking_id: &str) -> String {
    format!(
        r#"    <!-- Google Analytics -->
    <script async src="https://www.googletagmanager.com/gtag/js?id={tracking_id}"></script>
    <script>
      window.dataLayer = window.dataLayer || [];
      function gtag(){{dataLayer.push(arguments);}}
      gtag('js', new Date());
      gtag('config', '{tracking_id}');
    </script>"#
    )
}
