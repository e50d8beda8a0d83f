use axum::{response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GuideStep {
    pub title: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscLegend {
    pub r#type: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Guide {
    pub steps: &'static [GuideStep],
    pub disc: &'static [DiscLegend],
    pub faq: &'static [FaqEntry],
}

static GUIDE: Guide = Guide {
    steps: &[
        GuideStep {
            title: "Enter candidate details",
            content: "Open 'New Analysis' and fill in the candidate's name, position and experience level. Attach a CV (PDF/Doc) for a more accurate analysis.",
        },
        GuideStep {
            title: "Provide the interview",
            content: "Either upload a recording (MP3/MP4) or record live in the browser. Allow microphone access when recording live.",
        },
        GuideStep {
            title: "Let the analysis run",
            content: "The audio or video is processed into a transcript, summary, match score and DISC personality profile automatically.",
        },
        GuideStep {
            title: "Review the result",
            content: "Open the candidate to read the analysis, check the red flags and record the hiring decision.",
        },
    ],
    disc: &[
        DiscLegend {
            r#type: "D",
            label: "Dominance",
            description: "Results-driven, decisive and drawn to challenges. Suits leadership or sales roles.",
        },
        DiscLegend {
            r#type: "I",
            label: "Influence",
            description: "Enthusiastic, communicative and optimistic. Suits PR, marketing or customer service.",
        },
        DiscLegend {
            r#type: "S",
            label: "Steadiness",
            description: "Calm, patient and a good listener. Suits support, administration or HR.",
        },
        DiscLegend {
            r#type: "C",
            label: "Compliance",
            description: "Thorough, analytical and rule-abiding. Suits finance, engineering or data.",
        },
    ],
    faq: &[
        FaqEntry {
            question: "Which file formats are supported?",
            answer: "Recordings: MP3, WAV, M4A, MP4 (max 20 MB). CV: PDF, DOC, DOCX (max 5 MB).",
        },
        FaqEntry {
            question: "How is the DISC profile determined?",
            answer: "Communication style, intonation, word choice and sentence structure in the transcript are mapped onto Dominance, Influence, Steadiness or Compliance.",
        },
        FaqEntry {
            question: "Is candidate data kept?",
            answer: "Data lives only for the current session. Delete sensitive records from the candidate list once hiring is finished.",
        },
        FaqEntry {
            question: "What does the question generator's thinking mode do?",
            answer: "The model reasons longer to design questions that are hard to game and to build follow-ups from a candidate's hypothetical answer.",
        },
    ],
};

#[axum::debug_handler]
pub async fn guide() -> impl IntoResponse {
    Json(&GUIDE)
}
