//! Prompt constants and the roadmap prompt builder.
//!
//! Building is pure template substitution: identical profiles always render
//! identical prompts. Fixed fragments are substituted before profile fields so
//! user text can never smuggle a placeholder into the template.

use crate::validation::StudentProfile;

/// System prompt for roadmap generation. Enforces JSON-only output.
pub const ROADMAP_SYSTEM: &str =
    "You are a college admissions mentor writing a personalized roadmap for a \
    high school student. Be warm, practical, and strategic. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// The exact document shape the client renders. Embedded verbatim in the
/// prompt whenever structured output is requested.
pub const ROADMAP_SCHEMA: &str = r#"{
  "student_summary": "Two or three sentences describing the student's current position and overall strategy",
  "college_list_suggestions": {
    "reach": ["School name"],
    "target": ["School name"],
    "safety": ["School name"]
  },
  "timeline": [
    {
      "period": "11th grade, September",
      "focus": "What this period is about",
      "tasks": ["Concrete action item"]
    }
  ],
  "academic_plan": {
    "course_suggestions": ["Course name"],
    "testing_strategy": "SAT/ACT guidance tailored to this student"
  },
  "extracurriculars": {
    "current_optimization": "How to deepen what they already do",
    "new_opportunities": ["Program, competition, or scholarship that matches them"]
  }
}"#;

/// Reference timeline showing the granularity and register expected of the
/// `timeline` entries.
const EXAMPLE_TIMELINE: &str = r#"**May-August**
- May-July: Summer. Many students use this for programs, research, starting college essay drafts, or jobs.
- Late July: QuestBridge application opens
- August 1st: UC application opens
- August 1st: Common App opens. Most people apply to college here; personal info should be filled out by the end of August.
- Mid-late August: SAT

**September**
- Keep working on main essays and finalize the college list.
- ~September 26: QuestBridge application deadline (submit by this deadline to be considered a finalist)
- Ask teachers for letters of recommendation
- September ACT

**October**
- If applying early, finalize the main essay and start supplementals.
- October 18th: QuestBridge finalists' results released
- Take the October SAT if needed
- Keep working on UC applications

**November**
- November 1st: QuestBridge Match application due; Early Action/Decision applications due
- Work on supplements; create templates for common questions like "Why Major" to save time
- November 30 to early December: UC applications due

**December-January**
- December 1st: QuestBridge Match results released; if not matched, apply Regular Decision or via Common App
- Mid December-January: ED/EA results come out; if deferred, write a Letter of Continued Interest
- Finish all college applications (many due early January)

**January-March**
- Send new updates (awards, activities) to colleges as they happen
- March: Most decisions come out
- Enjoy the rest of senior year once applications are done"#;

/// Roadmap prompt template. Fixed fragments ({output_schema},
/// {example_timeline}) are substituted before the profile placeholders.
const ROADMAP_PROMPT_TEMPLATE: &str = r#"Write a personalized college admissions roadmap for a high school student.

The student is in {grade} grade, has a {gpa} GPA, is interested in {interests}, and participates in {activities}. They are from a {demographics} background, so keep that in mind.

Give month-by-month and grade-by-grade advice that is practical, empathetic, and tailored to their personal background. Give academic goals, extracurricular tips, and summer suggestions aligned with their stated interests and clubs. Reference their current activities directly and suggest specific scholarships, programs, or competitions that match their situation.

Testing information to take into account: {testing}

The student is aiming for this in their colleges: {college_goals}. Advise them on routes they should take, and on other school options if necessary (for example if they are well below the standard). Give advice about colleges outside of their stated goals too, since it is important not to be limited. When you suggest backup options, do not call schools safeties unless they actually are. Always make clear which school year you are referring to; never switch grades mid-year without saying so.

Additional information about their classes: {classes}. Take this into consideration, but since their school's offerings are unknown, frame everything as a suggestion for future courses.

Location preference, if any: {location}

Use this timeline as an example of the structure and level of detail expected:

{example_timeline}

Do NOT give generic advice like "join clubs"; personalize everything based on what they have already done. Be honest and reasonable while staying uplifting. Do not ask follow-up questions or offer further help after your final thoughts.

Respond with a single JSON object following this exact schema:

{output_schema}"#;

/// Renders the roadmap prompt from a validated profile. Pure and
/// deterministic; profile fields are interpolated verbatim.
pub fn build_roadmap_prompt(profile: &StudentProfile) -> String {
    ROADMAP_PROMPT_TEMPLATE
        .replace("{example_timeline}", EXAMPLE_TIMELINE)
        .replace("{output_schema}", ROADMAP_SCHEMA)
        .replace("{grade}", &profile.grade)
        .replace("{gpa}", &profile.gpa.to_string())
        .replace("{interests}", &profile.interests)
        .replace("{activities}", or_unspecified(&profile.activities))
        .replace("{demographics}", or_unspecified(&profile.demographics))
        .replace("{testing}", or_unspecified(&profile.testing))
        .replace("{college_goals}", or_unspecified(&profile.college_goals))
        .replace("{classes}", or_unspecified(&profile.classes))
        .replace("{location}", or_unspecified(&profile.location))
}

fn or_unspecified(value: &str) -> &str {
    if value.trim().is_empty() {
        "not provided"
    } else {
        value
    }
}
