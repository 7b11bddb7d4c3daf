//! Command-line interface for the booking portal.
//!
//! Provides an interactive menu for loading a doctor roster, browsing
//! departments, viewing a doctor's slots for a date, and booking one.

use chrono::{Duration, Local, NaiveDate, Utc};
use medibook::api::decode_doctor_list_str;
use medibook::calendar::{format_availability, weekday_name};
use medibook::config::AppConfig;
use medibook::{
    telemetry, AppointmentScheduler, AvailabilityWindow, BookingError, Department, Doctor, Role,
    Session,
};
use std::fs;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

struct BookingCLI {
    config: AppConfig,
    scheduler: AppointmentScheduler,
    session: Option<Session>,
    selected_doctor: Option<String>,
    selected_date: NaiveDate,
    running: bool,
}

impl BookingCLI {
    fn new(config: AppConfig) -> Self {
        BookingCLI {
            config,
            scheduler: AppointmentScheduler::new(Vec::new()),
            session: None,
            selected_doctor: None,
            selected_date: Local::now().date_naive(),
            running: true,
        }
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       HOSPITAL APPOINTMENT BOOKING");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        println!("\n--- Main Menu ---");
        println!("1. Load doctors");
        println!("2. Log in");
        println!("3. Browse department");
        println!("4. Select doctor");
        println!("5. View slots for a date");
        println!("6. Book a slot");
        println!("7. Edit doctor availability");
        println!("8. Run demo");
        println!("9. Exit");
        println!("{}", "-".repeat(20));
    }

    fn get_input(&mut self, prompt: &str, default: Option<&str>) -> String {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) => {
                // stdin closed
                self.running = false;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Failed to read input: {}", e);
                self.running = false;
            }
        }
        let input = input.trim();

        if input.is_empty() {
            default.unwrap_or("").to_string()
        } else {
            input.to_string()
        }
    }

    fn get_int_input(&mut self, prompt: &str, default: Option<i32>) -> i32 {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref());

            if let Ok(value) = input.parse::<i32>() {
                return value;
            }
            if !self.running {
                return default.unwrap_or(0);
            }
            println!("Please enter a valid number");
        }
    }

    fn get_date_input(&mut self, prompt: &str) -> Option<NaiveDate> {
        let default = self.selected_date.format("%Y-%m-%d").to_string();
        let input = self.get_input(prompt, Some(&default));
        match NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                println!("Dates look like 2024-06-03");
                None
            }
        }
    }

    fn load_doctors(&mut self) {
        println!("\n--- Load Doctors ---");

        let default_path = self
            .config
            .doctors_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let path = self.get_input("Doctor list JSON (blank for demo roster)", Some(&default_path));

        let doctors = if path.is_empty() {
            demo_roster()
        } else {
            match read_doctor_file(&path) {
                Ok(doctors) => doctors,
                Err(e) => {
                    println!("\nCould not load {}: {}", path, e);
                    return;
                }
            }
        };

        println!("\nLoaded {} doctors", doctors.len());
        self.scheduler.set_doctors(doctors);
        self.selected_doctor = None;
    }

    fn login(&mut self) {
        println!("\n--- Log In ---");

        let role = self.get_input("Role (patient/doctor)", Some("patient"));
        let role = match Role::from_string(&role) {
            Ok(role) => role,
            Err(e) => {
                println!("\n{}", e);
                return;
            }
        };
        let token = self.get_input("Access token", None);

        let lifetime = Duration::hours(self.config.session_hours);
        match Session::new(token, role, Utc::now(), lifetime) {
            Ok(session) => {
                if let Some(previous) = self.session.replace(session) {
                    previous.end();
                }
                println!("\nLogged in as {}", role.name());
            }
            Err(e) => println!("\nLogin failed: {}", e),
        }
    }

    fn browse_department(&mut self) {
        println!("\n--- Departments ---");
        for (i, department) in Department::ALL.iter().enumerate() {
            println!("  {}. {}", i + 1, department);
        }

        let choice = self.get_int_input("Select department", Some(1));
        let Some(department) = menu_index(choice)
            .and_then(|i| Department::ALL.get(i).copied())
        else {
            println!("Invalid choice");
            return;
        };

        let doctors = self.scheduler.doctors_in(department);
        if doctors.is_empty() {
            println!("\nNo doctors available in {}", department);
            return;
        }

        println!("\n{} ({} doctors):", department, doctors.len());
        for doctor in doctors {
            print_doctor(doctor);
        }
    }

    fn select_doctor(&mut self) {
        if self.scheduler.doctors().is_empty() {
            println!("\nPlease load doctors first (option 1)");
            return;
        }

        println!("\n--- Select Doctor ---");
        for (i, doctor) in self.scheduler.doctors().iter().enumerate() {
            println!("  {}. {}", i + 1, doctor.name);
        }

        let choice = self.get_int_input("Select doctor", Some(1));
        let picked = menu_index(choice)
            .and_then(|i| self.scheduler.doctors().get(i))
            .map(|d| (d.id.clone(), d.name.clone()));

        match picked {
            Some((id, name)) => {
                println!("\nSelected {}", name);
                self.selected_doctor = Some(id);
            }
            None => println!("Invalid choice"),
        }
    }

    fn view_slots(&mut self) {
        let Some(doctor_id) = self.selected_doctor.clone() else {
            println!("\nPlease select a doctor first (option 4)");
            return;
        };

        let Some(date) = self.get_date_input("Date") else {
            return;
        };
        self.selected_date = date;

        match self.scheduler.available_slots(&doctor_id, date) {
            Ok(slots) if slots.is_empty() => {
                println!(
                    "\nNo time slots available on {}. Please select another date.",
                    weekday_name(date)
                );
            }
            Ok(slots) => {
                println!("\n{} ({}):", date.format("%A, %Y-%m-%d"), slots.len());
                for slot in slots {
                    println!("  {}", slot);
                }
            }
            Err(e) => println!("\n{}", e),
        }
    }

    fn book_slot(&mut self) {
        let Some(doctor_id) = self.selected_doctor.clone() else {
            println!("\nPlease select a doctor first (option 4)");
            return;
        };
        if let Err(e) = active_session(&self.session) {
            println!("\n{}. Please log in first (option 2)", e);
            return;
        }

        println!("\n--- Book Appointment ---");
        let Some(date) = self.get_date_input("Date") else {
            return;
        };

        let slots = match self.scheduler.available_slots(&doctor_id, date) {
            Ok(slots) => slots,
            Err(e) => {
                println!("\n{}", e);
                return;
            }
        };
        if slots.is_empty() {
            println!("\nNo time slots available for this day. Please select another date.");
            return;
        }

        for (i, slot) in slots.iter().enumerate() {
            println!("  {}. {}", i + 1, slot);
        }
        let choice = self.get_int_input("Select slot", Some(1));
        let slot = menu_index(choice)
            .and_then(|i| slots.get(i))
            .cloned()
            .unwrap_or_default();

        let problem = self.get_input("Describe your problem", None);

        let Ok(session) = active_session(&self.session) else {
            return;
        };
        match self
            .scheduler
            .book(session, Utc::now(), &doctor_id, date, slot, problem)
        {
            Ok(request) => {
                self.selected_date = date;
                println!("\nAppointment request ready. Proceed to payment.");
                match serde_json::to_string_pretty(&request) {
                    Ok(body) => println!("{}", body),
                    Err(e) => warn!("Could not render request: {}", e),
                }
                println!("Pending requests: {}", self.scheduler.pending_count());
            }
            Err(BookingError::SessionExpired) => {
                println!("\nSession expired, please log in again");
                if let Some(expired) = self.session.take() {
                    expired.end();
                }
            }
            Err(e) => println!("\nBooking failed: {}", e),
        }
    }

    fn edit_availability(&mut self) {
        let Some(doctor_id) = self.selected_doctor.clone() else {
            println!("\nPlease select a doctor first (option 4)");
            return;
        };
        if let Err(e) = active_session(&self.session) {
            println!("\n{}. Please log in first (option 2)", e);
            return;
        }

        if let Ok(doctor) = self.scheduler.find_doctor(&doctor_id) {
            println!("\nCurrent availability:");
            println!("{}", format_availability(&doctor.availability));
        }

        println!("\nEnter one window per line, e.g. 'Monday 9:00AM-5:00PM'. Blank line to finish.");
        let mut lines = Vec::new();
        loop {
            let line = self.get_input(">", None);
            if line.is_empty() || !self.running {
                break;
            }
            lines.push(line);
        }

        let Ok(session) = active_session(&self.session) else {
            return;
        };
        match self
            .scheduler
            .update_availability(session, Utc::now(), &doctor_id, &lines.join("\n"))
        {
            Ok(count) => println!("\nSaved {} availability windows", count),
            Err(e) => println!("\nUpdate failed: {}", e),
        }
    }

    fn run_demo(&mut self) {
        println!("\n--- Running Demo ---");

        let mut scheduler = AppointmentScheduler::new(demo_roster());
        let session = match Session::new(
            "demo-token".to_string(),
            Role::Patient,
            Utc::now(),
            Duration::hours(1),
        ) {
            Ok(session) => session,
            Err(e) => {
                println!("Demo could not start: {}", e);
                return;
            }
        };

        let today = Local::now().date_naive();
        for offset in 0..7 {
            let date = today + Duration::days(offset);
            for doctor in scheduler.doctors() {
                let slots = scheduler.available_slots(&doctor.id, date).unwrap_or_default();
                if !slots.is_empty() {
                    println!(
                        "  {:10} {:18} {} slots, first {}",
                        weekday_name(date),
                        doctor.name,
                        slots.len(),
                        slots[0]
                    );
                }
            }
        }

        let booked = (0..7)
            .map(|offset| today + Duration::days(offset))
            .find_map(|date| {
                let slot = scheduler
                    .available_slots("demo-cardio", date)
                    .ok()?
                    .into_iter()
                    .next()?;
                Some((date, slot))
            });

        if let Some((date, slot)) = booked {
            match scheduler.book(
                &session,
                Utc::now(),
                "demo-cardio",
                date,
                slot,
                "Chest pain after exercise".to_string(),
            ) {
                Ok(request) => println!(
                    "\nBooked {} on {} with Dr. Anita Rao",
                    request.time_slot,
                    date.format("%A, %Y-%m-%d")
                ),
                Err(e) => println!("\nDemo booking failed: {}", e),
            }
        }

        println!("\nNote: Dr. Vikram Shah's Tuesday windows overlap,");
        println!("so the 11:00 AM slot is listed twice.");

        session.end();
        info!("Demo finished");
    }

    fn run(&mut self) {
        self.print_header();

        while self.running {
            self.print_menu();

            let choice = self.get_int_input("Enter choice", Some(8));
            if !self.running {
                break;
            }

            match choice {
                1 => self.load_doctors(),
                2 => self.login(),
                3 => self.browse_department(),
                4 => self.select_doctor(),
                5 => self.view_slots(),
                6 => self.book_slot(),
                7 => self.edit_availability(),
                8 => self.run_demo(),
                9 => {
                    self.running = false;
                    if let Some(session) = self.session.take() {
                        session.end();
                    }
                    println!("\nGoodbye!");
                }
                _ => println!("Invalid choice"),
            }
        }
    }
}

/// Zero-based index for a 1-based menu choice.
fn menu_index(choice: i32) -> Option<usize> {
    choice.checked_sub(1).and_then(|i| usize::try_from(i).ok())
}

fn active_session(session: &Option<Session>) -> medibook::Result<&Session> {
    session.as_ref().ok_or(BookingError::NotLoggedIn)
}

fn print_doctor(doctor: &Doctor) {
    println!("  - {}", doctor.name);
    if !doctor.specialization.is_empty() {
        println!("    {}", doctor.specialization.join(", "));
    }
    println!("    Experience: {} years", doctor.experience.unwrap_or(0));
    if let Some(fee) = doctor.fee {
        println!("    Fee: {:.2}", fee);
    }
}

fn read_doctor_file(path: &str) -> medibook::Result<Vec<Doctor>> {
    let body = fs::read_to_string(path)?;
    decode_doctor_list_str(&body)
}

fn demo_roster() -> Vec<Doctor> {
    vec![
        Doctor {
            id: "demo-cardio".to_string(),
            name: "Dr. Anita Rao".to_string(),
            specialization: vec!["Cardiology".to_string(), "Echocardiography".to_string()],
            experience: Some(14),
            fee: Some(800.0),
            department: Some("Cardiology".to_string()),
            availability: vec![
                AvailabilityWindow::new("Monday", "9:00 AM", "12:00 PM"),
                AvailabilityWindow::new("Wednesday", "2:00 PM", "6:00 PM"),
                AvailabilityWindow::new("Friday", "10 AM", "1 PM"),
            ],
        },
        Doctor {
            id: "demo-neuro".to_string(),
            name: "Dr. Vikram Shah".to_string(),
            specialization: vec!["Neurology".to_string()],
            experience: Some(9),
            fee: Some(650.0),
            department: Some("Neurology".to_string()),
            availability: vec![
                AvailabilityWindow::new("Tuesday", "09:00", "12:00"),
                AvailabilityWindow::new("tuesday", "11:00", "13:00"),
                AvailabilityWindow::new("Thursday", "4:00 PM", "8:00 PM"),
            ],
        },
        Doctor {
            id: "demo-peds".to_string(),
            name: "Dr. Meera Nair".to_string(),
            specialization: vec!["Pediatrics".to_string()],
            experience: Some(6),
            fee: Some(500.0),
            department: Some("Pediatrics".to_string()),
            availability: vec![AvailabilityWindow::new("Saturday", "8:00 AM", "12:00 PM")],
        },
    ]
}

fn main() {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env();
    telemetry::init(&config.log_level);

    info!("Starting booking CLI");
    let mut cli = BookingCLI::new(config);
    cli.run();
}
