//! Line-based terminal front end for a screening session.

use std::error::Error;
use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use healthguard_lib::catalog::MEDICAL_HISTORY_OPTIONS;
use healthguard_lib::config::{self, AiConfig};
use healthguard_lib::models::{BodyRegion, Gender, Question, QuestionType, ScreeningResult};
use healthguard_lib::pipeline::client::GeminiClient;
use healthguard_lib::screening::{ProfileDraft, ScreeningSession, SessionError, SessionState};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    healthguard_lib::init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let ai_config = AiConfig::from_env();
    if ai_config.api_key.is_none() {
        tracing::warn!("No API key configured; analysis requests will fail");
    }
    let client = GeminiClient::new(&ai_config)?;
    let session = ScreeningSession::new();
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("{} v{}", config::APP_NAME, config::APP_VERSION);
    loop {
        match session.state()? {
            SessionState::Intake => {
                if !intake(&session, &mut input).await? {
                    break;
                }
            }
            SessionState::CategoryBrowsing => {
                if !browse(&session, &mut input).await? {
                    break;
                }
            }
            SessionState::Answering => {
                if !answer_and_submit(&session, &client, &mut input).await? {
                    break;
                }
            }
            SessionState::Submitted => {
                if !chat(&session, &client, &mut input).await? {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Print `label` and read one line. `None` on end of input.
async fn ask(input: &mut Input, label: &str) -> Result<Option<String>, Box<dyn Error>> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|l| l.trim().to_string()))
}

/// 1-based menu choices like "1, 3".
fn parse_choices(line: &str, len: usize) -> Vec<usize> {
    line.split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
        .collect()
}

async fn intake(session: &ScreeningSession, input: &mut Input) -> Result<bool, Box<dyn Error>> {
    println!("\n== Thông tin bệnh nhân ==");
    let mut draft = ProfileDraft::default();

    let Some(age) = ask(input, "Tuổi: ").await? else { return Ok(false) };
    draft.age = age;

    let genders = Gender::all();
    for (i, g) in genders.iter().enumerate() {
        println!("  {}. {g}", i + 1);
    }
    let Some(choice) = ask(input, "Giới tính [1]: ").await? else { return Ok(false) };
    if let Some(&i) = parse_choices(&choice, genders.len()).first() {
        draft.gender = genders[i];
    }

    let Some(location) = ask(input, "Khu vực sinh sống: ").await? else { return Ok(false) };
    draft.location = location;

    for (i, item) in MEDICAL_HISTORY_OPTIONS.iter().enumerate() {
        println!("  {}. {item}", i + 1);
    }
    let Some(history) = ask(input, "Tiền sử bệnh (vd: 2,3): ").await? else { return Ok(false) };
    for i in parse_choices(&history, MEDICAL_HISTORY_OPTIONS.len()) {
        draft.toggle_history(MEDICAL_HISTORY_OPTIONS[i]);
    }

    match session.enter_browsing(&draft) {
        Ok(_) => {}
        Err(SessionError::Validation(e)) => println!("Vui lòng điền đủ thông tin: {e}"),
        Err(e) => return Err(e.into()),
    }
    Ok(true)
}

async fn browse(session: &ScreeningSession, input: &mut Input) -> Result<bool, Box<dyn Error>> {
    let categories = session.visible_categories()?;
    println!("\n== Chọn nhóm triệu chứng ==");
    for (i, c) in categories.iter().enumerate() {
        println!("  {}. {}", i + 1, c.label);
    }
    let regions: Vec<&str> = BodyRegion::all().iter().map(BodyRegion::as_str).collect();
    println!("(số: chọn nhóm, vùng: {}, /từ khóa: tìm kiếm, b: quay lại)", regions.join("|"));

    let Some(line) = ask(input, "> ").await? else { return Ok(false) };
    if line == "b" {
        session.return_to_intake()?;
    } else if let Some(term) = line.strip_prefix('/') {
        session.set_search(term)?;
    } else if let Ok(region) = line.parse::<BodyRegion>() {
        session.set_search("")?;
        session.toggle_region(region)?;
    } else if let Some(&i) = parse_choices(&line, categories.len()).first() {
        session.select_category(categories[i].id)?;
    }
    Ok(true)
}

fn print_question(question: &Question) {
    println!("\n{}", question.text);
    match question.kind {
        QuestionType::Scale => println!("  (1-10, Enter để bỏ qua)"),
        QuestionType::Text => println!("  (Enter để bỏ qua)"),
        QuestionType::Single | QuestionType::Multiple => {
            for (i, option) in question.options.iter().enumerate() {
                println!("  {}. {option}", i + 1);
            }
        }
    }
}

async fn answer_and_submit(
    session: &ScreeningSession,
    client: &GeminiClient,
    input: &mut Input,
) -> Result<bool, Box<dyn Error>> {
    let Some(flow) = session.flow()? else {
        return Ok(true);
    };
    println!("\n== {} ==", flow.category().label);

    for question in flow.questions() {
        print_question(question);
        let Some(line) = ask(input, "> ").await? else { return Ok(false) };
        if line.is_empty() {
            continue;
        }
        let mut values: Vec<&str> = match question.kind {
            QuestionType::Single | QuestionType::Multiple => {
                parse_choices(&line, question.options.len())
                    .into_iter()
                    .map(|i| question.options[i])
                    .collect()
            }
            QuestionType::Scale | QuestionType::Text => vec![line.as_str()],
        };
        if question.kind == QuestionType::Single {
            values.truncate(1);
        }
        for value in values {
            if let Err(e) = session.record_answer(question.id, value) {
                println!("  {e}");
            }
        }
    }

    loop {
        println!("\nĐang phân tích...");
        match session.submit_analysis(client).await {
            Ok(result) => {
                print_result(&result);
                return Ok(true);
            }
            Err(SessionError::Analysis(e)) => {
                println!("{}", e.user_message());
                let Some(line) = ask(input, "Thử lại? (Enter: thử lại, r: bắt đầu lại) ").await? else {
                    return Ok(false);
                };
                if line == "r" {
                    session.reset()?;
                    return Ok(true);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn print_result(result: &ScreeningResult) {
    println!("\n== KẾT QUẢ SÀNG LỌC ==");
    println!("Mức độ: {} ({:?})", result.risk_level, result.tone());
    println!("{}", result.triage_message);
    if result.risk_level.is_emergency() {
        println!("!!! GỌI CẤP CỨU 115 NGAY !!!");
    }
    println!("\n{}", result.summary);

    println!("\nChẩn đoán phân biệt:");
    for condition in &result.potential_conditions {
        println!(
            "  - {} {}% [{:?}]: {}",
            condition.name,
            condition.match_percentage,
            condition.band(),
            condition.reasoning
        );
        if let Some(missing) = &condition.missing_symptoms {
            if !missing.is_empty() {
                println!("    Không có: {}", missing.join(", "));
            }
        }
    }

    println!("\nHướng dẫn chăm sóc:");
    for (i, advice) in result.care_advice.iter().enumerate() {
        println!("  {}. {advice}", i + 1);
    }
    println!("\nChuyên khoa: {}", result.recommended_specialist);
}

async fn chat(
    session: &ScreeningSession,
    client: &GeminiClient,
    input: &mut Input,
) -> Result<bool, Box<dyn Error>> {
    if let Some(welcome) = session.chat_history()?.last() {
        println!("\nBác sĩ AI: {}", welcome.text);
    }
    println!("(nhập câu hỏi, 'reset' để bắt đầu lại, 'quit' để thoát)");

    loop {
        let Some(line) = ask(input, "\nBạn: ").await? else { return Ok(false) };
        match line.as_str() {
            "quit" => return Ok(false),
            "reset" => {
                session.reset()?;
                return Ok(true);
            }
            _ => {}
        }
        match session.send_chat_message(client, &line).await {
            Ok(reply) => println!("Bác sĩ AI: {}", reply.turn.text),
            Err(SessionError::EmptyMessage) => {}
            Err(e) => return Err(e.into()),
        }
    }
}
