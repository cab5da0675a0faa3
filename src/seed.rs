//! Built-in portfolio achievements used to seed the in-memory store.

use crate::types::{Achievement, AchievementId, Category, Status, TechTag};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid")
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    title: &str,
    description: &str,
    category: Category,
    status: Status,
    date: NaiveDate,
    impact: &str,
    tech_stack: &[TechTag],
) -> Achievement {
    Achievement {
        id: AchievementId::from(id),
        title: title.to_string(),
        description: description.to_string(),
        category,
        status,
        date,
        impact: impact.to_string(),
        tech_stack: tech_stack.to_vec(),
    }
}

/// The seed dataset, in display order.
pub fn seed_achievements() -> Vec<Achievement> {
    use Category::*;
    use TechTag::*;

    vec![
        record(
            "dynamic-linking-system",
            "Custom Dynamic Linking System",
            "Built a custom dynamic linking system with Next.js to replace Google Dynamic Links, \
             providing a more flexible and maintainable solution to seamlessly redirect users to \
             the mobile app.",
            Technical,
            Status::Completed,
            date(2024, 3, 15),
            "Reduced maintenance costs and increased flexibility for deep linking across platforms",
            &[NextJs, TypeScript, Firebase],
        ),
        record(
            "abc-app-launch",
            "Cross-Platform ABC App Launch",
            "Successfully built and launched cross-platform ABC app for both Android and iOS with \
             Flutter, integrated dynamic link system, AI-powered chatbot, and 9Pay payment gateway.",
            Project,
            Status::Completed,
            date(2024, 6, 20),
            "Delivered full-featured mobile app serving thousands of active users",
            &[Flutter, BloC, Firebase, AiIntegration, PaymentSystems],
        ),
        record(
            "analytics-infrastructure",
            "Advanced Analytics Infrastructure",
            "Implemented and managed advanced analytics via Firebase SDK, configured funnels in \
             Google Analytics, and prepared data in BigQuery to support BI analysis.",
            Technical,
            Status::Completed,
            date(2024, 1, 10),
            "Enabled data-driven decision making for product development and improved user insights",
            &[Firebase, GoogleAnalytics, BigQuery],
        ),
        record(
            "team-technical-workshops",
            "Team Technical Training Program",
            "Contributed to team growth by hosting technical workshops and training new developers \
             on core technologies.",
            Leadership,
            Status::InProgress,
            date(2023, 9, 1),
            "Accelerated onboarding process and improved team technical capabilities",
            &[NextJs, ReactJs, TypeScript, Flutter],
        ),
        record(
            "cms-real-time-system",
            "Internal CMS Development",
            "Developed an internal CMS using React and .NET Core, allowing real-time service \
             customization for customers.",
            Project,
            Status::Completed,
            date(2023, 5, 12),
            "Enabled real-time configuration for client services, reducing manual work by 70%",
            &[ReactJs, Bootstrap, TypeScript, DotNetCore],
        ),
        record(
            "cicd-automation",
            "CI/CD Pipeline Implementation",
            "Implemented CI/CD pipelines using GitHub Actions to automate the build and \
             distribution of test builds via Firebase App Distribution.",
            Technical,
            Status::Completed,
            date(2023, 2, 20),
            "Reduced deployment time by 80% and improved release reliability",
            &[GitHubActions, Firebase, Flutter],
        ),
        record(
            "micro-frontend-architecture",
            "Micro-Frontend Architecture",
            "Applied a Micro-frontend architecture using Flutter and BloC to manage complex \
             features of an internal IMT app.",
            Technical,
            Status::Completed,
            date(2023, 7, 15),
            "Improved code maintainability and enabled parallel development across teams",
            &[Flutter, BloC, MicroFrontend],
        ),
        record(
            "error-tracking-integration",
            "Sentry-Slack Integration",
            "Integrated Sentry with Slack for real-time error tracking, significantly reducing bug \
             resolution time.",
            Technical,
            Status::Completed,
            date(2022, 11, 8),
            "Decreased bug resolution time by 60% and improved team response time",
            &[Sentry, Slack, ReactJs],
        ),
        record(
            "photo-social-network",
            "Photo Social Network App",
            "Led the development of a photo social network app using Flutter and BloC with \
             Firebase backend services. Successfully published on the Google Play Store.",
            Project,
            Status::Completed,
            date(2023, 4, 30),
            "Delivered production-ready mobile app with real-time engagement features",
            &[Flutter, BloC, Firebase, GooglePlay],
        ),
        record(
            "bachelor-degree",
            "Bachelor of Computer Science",
            "Graduated from University of Information Technology - HCM VNU with focus on Software \
             Engineering.",
            Education,
            Status::Completed,
            date(2024, 6, 1),
            "Solid foundation in computer science and software engineering principles",
            &[],
        ),
        record(
            "performance-optimization",
            "Web Platform Performance Optimization",
            "Developed and optimized high-performance, SEO-friendly web platforms for merchants \
             and users with Next.js and React.",
            Technical,
            Status::InProgress,
            date(2023, 8, 1),
            "Improved page load times and SEO rankings for e-commerce platforms",
            &[NextJs, ReactJs, TypeScript, TailwindCss],
        ),
        record(
            "ott-sdk-development",
            "OTT Functionality SDK",
            "Developed OTT functionality into a standalone SDK for external clients with ZegoCloud \
             integration.",
            Project,
            Status::Completed,
            date(2023, 3, 25),
            "Enabled external clients to integrate streaming features into their applications",
            &[Flutter, ZegoCloud, SdkDevelopment],
        ),
    ]
}
