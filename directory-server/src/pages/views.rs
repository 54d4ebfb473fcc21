//! Inline HTML builders for the pages
//!
//! Every value taken from a record or a form is passed through [`escape`].

use std::fmt::Write;

use shared::Employee;

/// Options offered by the designation select
const DESIGNATIONS: &[&str] = &[
    "Software Engineer",
    "Senior Software Engineer",
    "QA Engineer",
    "DevOps Engineer",
    "Product Manager",
    "Project Manager",
    "UI/UX Designer",
    "Data Analyst",
    "HR Manager",
    "Sales Executive",
];

/// Options offered by the department select
const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Quality Assurance",
    "Product",
    "Design",
    "Data",
    "Human Resources",
    "Sales",
    "Marketing",
    "Finance",
    "Operations",
];

const STYLE: &str = "body{font-family:sans-serif;margin:0;background:#f4f6f8}\
main{max-width:960px;margin:2rem auto;padding:0 1rem}\
nav{display:flex;gap:1rem;align-items:center;padding:1rem 2rem;background:#1f2937;color:#fff}\
nav a{color:#fff}\
.error{color:#b91c1c;background:#fee2e2;padding:.5rem 1rem;border-radius:4px}\
.employee-card{background:#fff;border-radius:6px;padding:1rem;margin:.5rem 0}\
table{width:100%;border-collapse:collapse;background:#fff}\
th,td{padding:.5rem;border-bottom:1px solid #e5e7eb;text-align:left}\
form label{display:block;margin:.5rem 0}";

/// HTML-escape text for element content and attribute values
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, nav: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}<main>\n{}</main>\n</body>\n</html>\n",
        escape(title),
        STYLE,
        nav,
        body
    )
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape(e)))
        .unwrap_or_default()
}

fn credentials_form(action: &str, button: &str) -> String {
    format!(
        "<form method=\"POST\" action=\"{action}\">\n\
<label>Email <input type=\"email\" name=\"username\" required></label>\n\
<label>Password <input type=\"password\" name=\"password\" required></label>\n\
<button type=\"submit\">{button}</button>\n</form>\n"
    )
}

/// Self-signup form
pub fn signup_page(error: Option<&str>) -> String {
    let body = format!(
        "<h2>Sign Up</h2>\n{}{}<p>Already have an account? <a href=\"/login\">Login here</a></p>\n",
        error_block(error),
        credentials_form("/signup", "Create Account"),
    );
    layout("Sign Up", "", &body)
}

/// User login form
pub fn login_page(error: Option<&str>) -> String {
    let body = format!(
        "<h2>User Login</h2>\n{}{}<p>No account yet? <a href=\"/signup\">Sign up here</a></p>\n\
<p><a href=\"/admin/login\">Admin Login</a></p>\n",
        error_block(error),
        credentials_form("/login", "Login"),
    );
    layout("User Login", "", &body)
}

/// Admin login form
pub fn admin_login_page(error: Option<&str>) -> String {
    let body = format!(
        "<h2>Admin Login</h2>\n{}{}<p><a href=\"/login\">User Login</a></p>\n",
        error_block(error),
        credentials_form("/admin/login", "Login"),
    );
    layout("Admin Login", "", &body)
}

fn admin_nav() -> &'static str {
    "<nav><strong>Employee Directory</strong>\
<a href=\"/admin/dashboard\">Dashboard</a>\
<a href=\"/directory\">Directory</a>\
<a href=\"/admin/add-employee\">Add Employee</a>\
<a href=\"/admin/logout\">Logout</a></nav>\n"
}

fn text(value: Option<&str>) -> String {
    escape(value.unwrap_or_default())
}

fn employee_card(employee: &Employee) -> String {
    let p = &employee.profile;
    format!(
        "<div class=\"employee-card\" data-id=\"{id}\">\n<h3>{name}</h3>\n\
<p><strong>Designation:</strong> {designation}</p>\n\
<p><strong>Email:</strong> {email}</p>\n\
<p><strong>Phone:</strong> {phone}</p>\n\
<p><strong>Department:</strong> {department}</p>\n\
<p><strong>Join Date:</strong> {joined}</p>\n\
<p><strong>Location:</strong> {location}</p>\n\
<a href=\"/admin/edit-employee/{id}\">Edit</a>\n\
<button type=\"button\" onclick=\"deleteEmployee({id})\">Delete</button>\n</div>\n",
        id = employee.id,
        name = escape(employee.name()),
        designation = text(p.designation.as_deref()),
        email = text(p.email.as_deref()),
        phone = text(p.phone.as_deref()),
        department = text(p.department.as_deref()),
        joined = text(p.joining_date.as_deref()),
        location = escape(&employee.location_label()),
    )
}

const DELETE_SCRIPT: &str = "<script>\n\
function deleteEmployee(id) {\n\
  if (!confirm('Are you sure you want to delete this employee?')) return;\n\
  fetch('/admin/delete-employee/' + id, { method: 'POST' })\n\
    .then(function (res) { return res.json(); })\n\
    .then(function (data) {\n\
      if (data.success) { alert('Employee deleted successfully'); location.reload(); }\n\
      else { alert(data.error || 'Failed to delete employee'); }\n\
    });\n\
}\n\
</script>\n";

/// Admin dashboard: total count and the most recent joiners
pub fn dashboard_page(total: usize, recent: &[&Employee]) -> String {
    let mut body = format!(
        "<h1>Welcome, Admin!</h1>\n<p>Total Employees: {total}</p>\n\
<p><a href=\"/admin/add-employee\">Add Employee</a></p>\n<h2>Recent Employees</h2>\n"
    );
    for employee in recent {
        body.push_str(&employee_card(employee));
    }
    body.push_str(DELETE_SCRIPT);
    layout("Admin Dashboard", admin_nav(), &body)
}

fn select(name: &str, options: &[&str], current: Option<&str>) -> String {
    let mut html = format!("<select name=\"{name}\" required>\n<option value=\"\">Select</option>\n");
    let current = current.filter(|c| !c.is_empty());
    if let Some(c) = current
        && !options.contains(&c)
    {
        let _ = writeln!(html, "<option selected>{}</option>", escape(c));
    }
    for option in options {
        let selected = if current == Some(*option) { " selected" } else { "" };
        let _ = writeln!(html, "<option{selected}>{}</option>", escape(option));
    }
    html.push_str("</select>");
    html
}

fn input(label: &str, name: &str, kind: &str, value: Option<&str>, required: bool) -> String {
    format!(
        "<label>{label} <input type=\"{kind}\" name=\"{name}\" value=\"{}\"{}></label>\n",
        text(value),
        if required { " required" } else { "" }
    )
}

/// Add or edit form; `employee` pre-populates the edit form
pub fn employee_form_page(employee: Option<&Employee>, error: Option<&str>) -> String {
    let (heading, action) = match employee {
        Some(e) => ("Edit Employee", format!("/admin/edit-employee/{}", e.id)),
        None => ("Add New Employee", "/admin/add-employee".to_string()),
    };
    let p = employee.map(|e| &e.profile);
    let location = p.and_then(|p| p.location.as_ref());

    let mut body = format!("<h1>{heading}</h1>\n{}", error_block(error));
    let _ = writeln!(body, "<form method=\"POST\" action=\"{action}\">");
    body.push_str(&input("Name", "name", "text", p.and_then(|p| p.name.as_deref()), true));
    let _ = writeln!(
        body,
        "<label>Designation {}</label>",
        select("designation", DESIGNATIONS, p.and_then(|p| p.designation.as_deref()))
    );
    body.push_str(&input("Email", "email", "email", p.and_then(|p| p.email.as_deref()), true));
    body.push_str(&format!(
        "<label>Password <input type=\"password\" name=\"password\" placeholder=\"{}\"></label>\n",
        if employee.is_some() {
            "Leave blank to keep current password"
        } else {
            "Defaults to password123"
        }
    ));
    body.push_str(&input("Phone", "phone", "tel", p.and_then(|p| p.phone.as_deref()), true));
    let _ = writeln!(
        body,
        "<label>Department {}</label>",
        select("department", DEPARTMENTS, p.and_then(|p| p.department.as_deref()))
    );
    body.push_str(&input(
        "Joining Date",
        "joiningDate",
        "date",
        p.and_then(|p| p.joining_date.as_deref()),
        true,
    ));
    body.push_str(&input(
        "City",
        "city",
        "text",
        location.and_then(|l| l.city.as_deref()),
        true,
    ));
    body.push_str(&input(
        "State",
        "state",
        "text",
        location.and_then(|l| l.state.as_deref()),
        true,
    ));

    let is_admin = employee.is_some_and(|e| e.is_admin());
    let _ = writeln!(
        body,
        "<label><input type=\"checkbox\" name=\"isAdmin\" value=\"true\"{}> Admin</label>",
        if is_admin { " checked" } else { "" }
    );
    if let Some(e) = employee
        && !e.registration_completed()
    {
        body.push_str(
            "<label><input type=\"checkbox\" name=\"completeRegistration\" value=\"true\"> \
Complete registration</label>\n",
        );
    }

    let _ = writeln!(
        body,
        "<button type=\"submit\">{}</button>\n</form>",
        if employee.is_some() { "Update Employee" } else { "Add Employee" }
    );
    layout(heading, admin_nav(), &body)
}

/// Directory table shown to any logged-in session
pub fn directory_page(user_name: &str, employees: &[Employee]) -> String {
    let mut body = format!(
        "<h1>Employee Directory</h1>\n<p>Welcome, {}!</p>\n<p>Total Employees: {}</p>\n\
<table>\n<thead><tr><th>ID</th><th>Name</th><th>Designation</th><th>Email</th><th>Phone</th>\
<th>Department</th><th>Join Date</th><th>Location</th></tr></thead>\n<tbody>\n",
        escape(user_name),
        employees.len()
    );
    for e in employees {
        let p = &e.profile;
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            e.id,
            escape(e.name()),
            text(p.designation.as_deref()),
            text(p.email.as_deref()),
            text(p.phone.as_deref()),
            text(p.department.as_deref()),
            text(p.joining_date.as_deref()),
            escape(&e.location_label()),
        );
    }
    body.push_str("</tbody>\n</table>\n");

    let nav = "<nav><strong>Employee Directory</strong><a href=\"/logout\">Logout</a></nav>\n";
    layout("Employee Directory", nav, &body)
}
