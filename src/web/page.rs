// src/web/page.rs
//! Single-page front end served at `/`

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Resume Assistant Chatbot</title>
  <style>
    body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
    label { display: block; margin-top: 1rem; font-weight: bold; }
    select, input[type=text] { width: 100%; padding: .4rem; }
    button { margin-top: 1rem; padding: .5rem 1.5rem; }
    #answer { white-space: pre-wrap; margin-top: 1.5rem; }
    .error { color: #b00020; }
    .success { color: #1b5e20; }
    #preview { max-width: 100%; margin-top: 1.5rem; display: none; }
  </style>
</head>
<body>
  <h1>Resume Assistant Chatbot</h1>
  <form id="ask-form">
    <label for="resume">Upload your resume</label>
    <input type="file" id="resume" name="resume" accept=".pdf,.txt,.png,.jpg,.jpeg">

    <label for="occupation">Select your occupation</label>
    <select id="occupation" name="occupation"></select>

    <label for="question">Ask a question about your resume or skills:</label>
    <input type="text" id="question" name="question">

    <button type="submit">Submit</button>
  </form>
  <p id="status"></p>
  <div id="answer"></div>
  <img id="preview" alt="Uploaded Resume">

  <script>
    const statusLine = document.getElementById("status");
    const answer = document.getElementById("answer");
    const preview = document.getElementById("preview");
    const resumeInput = document.getElementById("resume");

    function showStatus(text, kind) {
      statusLine.textContent = text;
      statusLine.className = kind;
    }

    async function loadOccupations() {
      const response = await fetch("/api/occupations");
      const body = await response.json();
      if (!body.success) {
        showStatus(body.error, "error");
        return;
      }
      const select = document.getElementById("occupation");
      for (const title of body.data) {
        const option = document.createElement("option");
        option.value = title;
        option.textContent = title;
        select.appendChild(option);
      }
    }

    resumeInput.addEventListener("change", () => {
      const file = resumeInput.files[0];
      if (file && file.type.startsWith("image/")) {
        preview.src = URL.createObjectURL(file);
        preview.style.display = "block";
      } else {
        preview.removeAttribute("src");
        preview.style.display = "none";
      }
    });

    document.getElementById("ask-form").addEventListener("submit", async (event) => {
      event.preventDefault();
      answer.textContent = "";
      showStatus("Processing...", "");
      const response = await fetch("/api/ask", {
        method: "POST",
        body: new FormData(event.target),
      });
      const body = await response.json();
      if (body.success) {
        answer.textContent = body.data.answer;
        showStatus(body.message, "success");
      } else {
        showStatus(body.error, "error");
      }
    });

    loadOccupations();
  </script>
</body>
</html>
"#;
