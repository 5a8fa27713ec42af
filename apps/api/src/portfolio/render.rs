use crate::portfolio::fields::join_tech_stack;
use crate::portfolio::models::Document;

/// Renders the document as markdown, section by section in page order:
/// hero, about, skills, experience, projects, contact.
pub fn render_portfolio_to_md(doc: &Document) -> String {
    let info = &doc.personal_info;
    let mut md = format!("# {}\n\n", info.name);
    md.push_str(&format!("**{}**\n\n", info.role));
    if !info.tagline.is_empty() {
        md.push_str(&format!("> {}\n\n", info.tagline));
    }
    md.push_str(&format!("- **Location:** {}\n", info.location));
    if !info.availability.is_empty() {
        md.push_str(&format!("- **Availability:** {}\n", info.availability));
    }
    md.push('\n');

    let about_title = if doc.about.title.is_empty() {
        "About"
    } else {
        doc.about.title.as_str()
    };
    md.push_str(&format!("## {about_title}\n\n{}\n\n", doc.about.description));

    if !doc.skills.is_empty() {
        md.push_str("## Skills\n\n");
        for group in &doc.skills {
            md.push_str(&format!(
                "- **{}** ({}): {}\n",
                group.category,
                group.icon.as_str(),
                group.items.join(", ")
            ));
        }
        md.push('\n');
    }

    if !doc.experience.is_empty() {
        md.push_str("## Experience\n\n");
        for job in &doc.experience {
            md.push_str(&format!("### {} @ {}\n", job.role, job.company));
            md.push_str(&format!("_{} · {}_\n\n", job.period, job.location));
            for bullet in &job.description {
                md.push_str(&format!("- {bullet}\n"));
            }
            md.push('\n');
        }
    }

    if !doc.projects.is_empty() {
        md.push_str("## Projects\n\n");
        for project in &doc.projects {
            md.push_str(&format!("### {}\n", project.title));
            md.push_str(&format!("_{}_\n\n", project.category));
            md.push_str(&format!("{}\n\n", project.description));
            md.push_str(&format!(
                "- **Stack:** {}\n",
                join_tech_stack(&project.tech_stack)
            ));
            if let Some(demo) = &project.links.demo {
                md.push_str(&format!("- **Demo:** {demo}\n"));
            }
            if let Some(repo) = &project.links.repo {
                md.push_str(&format!("- **Code:** {repo}\n"));
            }
            md.push('\n');
        }
    }

    md.push_str("## Contact\n\n");
    md.push_str(&format!("- **Email:** {}\n", info.email));
    for (platform, url) in &info.social {
        md.push_str(&format!("- **{platform}:** {url}\n"));
    }
    md
}
