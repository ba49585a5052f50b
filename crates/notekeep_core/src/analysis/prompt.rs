//! Prompt construction for the hosted chat model.

/// System instruction sent with every analysis request.
pub fn system_instruction(language: &str) -> String {
    format!(
        "You are an assistant that analyzes notes and extracts tasks, reminders and \
         calendar items from them. Always answer in {language}, as JSON only."
    )
}

/// Builds the user prompt for one note.
///
/// The schema block is fixed; `parse_model_reply` relies on these field names.
pub fn build_prompt(title: &str, body: &str, language: &str) -> String {
    format!(
        r#"Analyze the following note and extract every task, reminder and calendar item.

NOTE TITLE: "{title}"
NOTE CONTENT: "{body}"

Look for:
- TASKS: things that need to be done (actions, to-dos, projects)
- REMINDERS: things to remember (deadlines, important dates, follow-ups)
- CALENDAR ITEMS: appointments, meetings, events with specific dates/times

Write all human-readable text in {language}.

Reply in this EXACT JSON format:
{{
  "tasks": [
    {{
      "id": "task_1",
      "title": "Short title",
      "description": "Detailed description",
      "priority": "high|medium|low",
      "dueDate": "YYYY-MM-DD or null",
      "category": "work|personal|study|other"
    }}
  ],
  "reminders": [
    {{
      "id": "reminder_1",
      "title": "Reminder title",
      "description": "What to remember",
      "reminderDate": "YYYY-MM-DD",
      "reminderTime": "HH:MM or null",
      "type": "once|daily|weekly|monthly"
    }}
  ],
  "events": [
    {{
      "id": "event_1",
      "title": "Event name",
      "description": "Event description",
      "date": "YYYY-MM-DD",
      "time": "HH:MM or null",
      "duration": "X hours or null",
      "location": "Location or null",
      "attendees": ["person1", "person2"] or null
    }}
  ],
  "summary": "Short summary of what was extracted",
  "confidence": 0.85
}}

IMPORTANT: return only valid JSON, no extra text!"#
    )
}
